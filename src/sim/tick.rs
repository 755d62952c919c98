//! Per-frame simulation step
//!
//! Order within a frame: actor, speed, obstacles, collision, background.

use super::collision::first_collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance a running session by one frame of `dt_ms` milliseconds.
///
/// Does nothing outside `GamePhase::Running`. On collision the session
/// switches to `GameOver` and the rest of the frame is skipped.
pub fn tick(state: &mut GameState, dt_ms: f32) {
    if state.phase != GamePhase::Running {
        return;
    }
    let dt_ms = dt_ms.max(0.0);
    state.frames += 1;

    if state.actor.advance(dt_ms) {
        state.push_event(GameEvent::Landed);
    }

    state.speed = (state.speed + state.config.acceleration * dt_ms).min(state.config.max_speed);

    let step = state.advance_stream(dt_ms);
    if let Some(kind) = step.spawned {
        log::debug!("Spawned {:?} at frame {}", kind, state.frames);
        state.push_event(GameEvent::Spawned(kind));
    }
    let bonus = state.config.score_per_obstacle;
    for _ in 0..step.evicted {
        state.score += bonus;
        state.push_event(GameEvent::Cleared { bonus });
    }

    let actor_box = state.actor.collision_box(state.config.actor_hitbox_inset);
    if first_collision(&actor_box, state.obstacles(), state.config.obstacle_hitbox_inset).is_some() {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::Collision { score: state.score });
        log::info!("Collision after {} frames, final score {}", state.frames, state.score);
        return;
    }

    state.background_offset -= state.speed * state.config.background_parallax;
    if state.background_offset <= -state.config.field_width {
        state.background_offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, Preset};
    use crate::sim::obstacle::ObstacleKind;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 16.0;

    fn running(config: GameConfig) -> GameState {
        let mut state = GameState::new(config, 12345);
        state.start();
        state.drain_events();
        state
    }

    /// Classic tuning with no acceleration and obstacles too far right to ever
    /// reach the actor
    fn no_contact_config() -> GameConfig {
        GameConfig {
            acceleration: 0.0,
            field_width: 100_000.0,
            ..GameConfig::from_preset(Preset::Classic)
        }
    }

    #[test]
    fn test_idle_and_game_over_do_not_advance() {
        let mut state = GameState::new(GameConfig::default(), 1);
        tick(&mut state, 5000.0);
        assert_eq!(state.frames, 0);
        assert!(state.obstacles().is_empty());

        state.start();
        state.phase = GamePhase::GameOver;
        tick(&mut state, 5000.0);
        assert_eq!(state.frames, 0);
        assert!(state.obstacles().is_empty());
    }

    #[test]
    fn test_speed_accelerates_and_clamps() {
        let mut state = running(GameConfig::default());
        tick(&mut state, 100.0);
        assert!((state.speed - 4.1).abs() < 1e-5);

        for _ in 0..1000 {
            tick(&mut state, 100.0);
            if state.phase != GamePhase::Running {
                state.phase = GamePhase::Running;
            }
        }
        assert_eq!(state.speed, state.config.max_speed);
    }

    #[test]
    fn test_spawn_count_over_time_without_contact() {
        let mut state = running(no_contact_config());
        let mut spawned = 0u32;
        let mut elapsed = 0.0f32;

        for _ in 0..1000 {
            tick(&mut state, FRAME_MS);
            elapsed += FRAME_MS;
            spawned += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Spawned(_)))
                .count() as u32;
            assert_eq!(spawned, (elapsed / 1200.0).floor() as u32);
        }

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.speed, 4.0);
        assert_eq!(state.obstacles().len() as u32, spawned);
    }

    #[test]
    fn test_passing_obstacle_scores_bonus() {
        let config = GameConfig {
            acceleration: 0.0,
            spawn_interval_ms: 1e9,
            ..GameConfig::default()
        };
        let mut state = running(config);
        // Place an obstacle just behind the actor so it cannot collide
        state.stream.spawn(ObstacleKind::Bush);
        state.stream.obstacles[0].pos.x = 0.0;

        for _ in 0..10 {
            tick(&mut state, FRAME_MS);
        }
        // -40 after 10 frames at speed 4: right edge exactly at 0, still live
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles().len(), 1);

        tick(&mut state, FRAME_MS);
        assert_eq!(state.score, 10);
        assert!(state.obstacles().is_empty());
        assert!(state.drain_events().contains(&GameEvent::Cleared { bonus: 10 }));
    }

    #[test]
    fn test_collision_ends_session_and_freezes_score() {
        let mut state = running(GameConfig::default());
        state.score = 70;

        // Drop an obstacle right on top of the actor
        state.stream.spawn(ObstacleKind::Log);
        state.stream.obstacles[0].pos.x = state.actor.pos.x + state.speed;

        tick(&mut state, FRAME_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 70);
        assert!(state.drain_events().contains(&GameEvent::Collision { score: 70 }));

        let (offset, obstacles) = (state.background_offset, state.obstacles().to_vec());
        for _ in 0..100 {
            tick(&mut state, FRAME_MS);
        }
        assert_eq!(state.score, 70);
        assert_eq!(state.background_offset, offset);
        assert_eq!(state.obstacles(), obstacles.as_slice());
    }

    #[test]
    fn test_jump_clears_obstacle() {
        let config = GameConfig {
            acceleration: 0.0,
            spawn_interval_ms: 1e9,
            ..GameConfig::default()
        };
        let mut state = running(config);
        state.stream.spawn(ObstacleKind::Bush);
        // Obstacle hitbox reaches the actor's after roughly 40 frames at speed 4
        state.stream.obstacles[0].pos.x = 250.0;

        let mut jumped = false;
        for _ in 0..200 {
            let gap = state.obstacles().first().map(|o| o.pos.x - state.actor.pos.x);
            if !jumped && gap.is_some_and(|g| g < 100.0) {
                assert!(state.jump());
                jumped = true;
            }
            tick(&mut state, FRAME_MS);
            assert_eq!(state.phase, GamePhase::Running, "hit at frame {}", state.frames);
        }
        assert!(jumped);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_background_wraps() {
        let config = GameConfig {
            acceleration: 0.0,
            spawn_interval_ms: 1e9,
            field_width: 120.0,
            ..GameConfig::default()
        };
        let mut state = running(config);
        state.config.background_parallax = 0.5;
        // 2px per frame, 120px field: wraps on frame 60
        for _ in 0..59 {
            tick(&mut state, FRAME_MS);
        }
        assert_eq!(state.background_offset, -118.0);
        tick(&mut state, FRAME_MS);
        assert_eq!(state.background_offset, 0.0);
    }

    #[test]
    fn test_restart_matches_start() {
        let mut fresh = GameState::new(GameConfig::default(), 9);
        fresh.handle_input();

        let mut played = GameState::new(GameConfig::default(), 9);
        played.handle_input();
        for _ in 0..300 {
            tick(&mut played, FRAME_MS);
        }
        played.stream.spawn(ObstacleKind::Log);
        played.stream.obstacles.last_mut().unwrap().pos.x = played.actor.pos.x;
        tick(&mut played, FRAME_MS);
        assert_eq!(played.phase, GamePhase::GameOver);

        played.handle_input();
        assert_eq!(played.phase, GamePhase::Running);
        assert_eq!(played.score, fresh.score);
        assert_eq!(played.speed, fresh.speed);
        assert_eq!(played.actor, fresh.actor);
        assert_eq!(played.background_offset, fresh.background_offset);
        assert!(played.obstacles().is_empty());
        assert_eq!(played.stream.spawn_timer, 0.0);
    }

    #[test]
    fn test_landing_event() {
        let mut state = running(no_contact_config());
        state.jump();
        let mut landed = false;
        for _ in 0..60 {
            tick(&mut state, FRAME_MS);
            landed |= state.drain_events().contains(&GameEvent::Landed);
        }
        assert!(landed);
        assert!(!state.actor.airborne);
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            frames in proptest::collection::vec((1.0f32..120.0, any::<bool>()), 1..400),
        ) {
            let mut state = GameState::new(GameConfig::from_preset(Preset::Classic), seed);
            state.start();

            let bonus = state.config.score_per_obstacle;
            for (dt, press) in frames {
                if press {
                    state.handle_input();
                }
                let was_running = state.is_running();
                let (score, speed) = (state.score, state.speed);

                tick(&mut state, dt);

                prop_assert!(state.score >= score);
                prop_assert_eq!((state.score - score) % bonus, 0);
                prop_assert!(state.speed <= state.config.max_speed);
                if was_running {
                    prop_assert!(state.speed >= speed);
                } else {
                    prop_assert_eq!(state.score, score);
                }
                prop_assert!(state.actor.pos.y <= state.actor.ground_y);
                if !state.actor.airborne {
                    prop_assert_eq!(state.actor.pos.y, state.actor.ground_y);
                }
            }
        }

        #[test]
        fn prop_jump_while_airborne_is_noop(seed in any::<u64>(), steps in 1usize..30) {
            let mut state = GameState::new(GameConfig::default(), seed);
            state.start();
            state.jump();
            for _ in 0..steps {
                tick(&mut state, FRAME_MS);
            }
            prop_assume!(state.actor.airborne);
            let before = state.actor.clone();
            prop_assert!(!state.jump());
            prop_assert_eq!(state.actor, before);
        }
    }
}
