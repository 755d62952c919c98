//! Scrolling hazards: spawning, movement and eviction

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::GameConfig;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Bush,
    Log,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::Bush, ObstacleKind::Log];

    /// Uniform pick over `ALL`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Asset key for this kind's sprite
    pub fn sprite_name(&self) -> &'static str {
        match self {
            ObstacleKind::Bush => "bush_obstacle",
            ObstacleKind::Log => "log_obstacle",
        }
    }
}

/// A single obstacle on the ground line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner; y never changes
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2, size: Vec2) -> Self {
        Self { kind, pos, size }
    }

    /// Scroll left by `speed` pixels
    pub fn scroll(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    /// Right edge has passed the left edge of the field
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn collision_box(&self, inset: f32) -> Rect {
        self.bounds().inset(inset)
    }
}

/// Result of one stream step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStep {
    pub spawned: Option<ObstacleKind>,
    /// Obstacles that left the field this step
    pub evicted: u32,
}

/// Spawn timer plus the live obstacles, in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    pub obstacles: Vec<Obstacle>,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_timer: f32,
    spawn_interval_ms: f32,
    spawn_x: f32,
    spawn_y: f32,
    size: Vec2,
}

impl ObstacleStream {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval_ms: config.spawn_interval_ms,
            spawn_x: config.field_width,
            spawn_y: config.obstacle_y(),
            size: Vec2::new(config.obstacle_width, config.obstacle_height),
        }
    }

    /// Drop every obstacle and restart the spawn timer
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;
    }

    /// Append a new obstacle at the right edge of the field
    pub fn spawn(&mut self, kind: ObstacleKind) {
        self.obstacles.push(Obstacle::new(
            kind,
            Vec2::new(self.spawn_x, self.spawn_y),
            self.size,
        ));
    }

    /// Spawn (at most one obstacle), scroll everything by `speed`, then evict
    /// what has left the field.
    ///
    /// The spawn timer keeps its remainder past the interval, so over frames
    /// shorter than the interval the spawn count is `floor(elapsed / interval)`.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt_ms: f32, speed: f32, rng: &mut R) -> StreamStep {
        let mut step = StreamStep::default();

        self.spawn_timer += dt_ms;
        if self.spawn_timer >= self.spawn_interval_ms {
            let kind = ObstacleKind::random(rng);
            self.spawn(kind);
            // Keep the overshoot instead of zeroing: spawns land on exact
            // multiples of the interval rather than drifting a frame per cycle
            self.spawn_timer = (self.spawn_timer - self.spawn_interval_ms).min(self.spawn_interval_ms);
            step.spawned = Some(kind);
        }

        for obstacle in &mut self.obstacles {
            obstacle.scroll(speed);
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        step.evicted = (before - self.obstacles.len()) as u32;

        step
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stream(interval: f32) -> ObstacleStream {
        let config = GameConfig {
            spawn_interval_ms: interval,
            ..GameConfig::default()
        };
        ObstacleStream::new(&config)
    }

    #[test]
    fn test_spawns_at_right_edge_on_ground_line() {
        let config = GameConfig::default();
        let mut s = ObstacleStream::new(&config);
        let mut rng = Pcg32::seed_from_u64(1);

        let step = s.advance(1800.0, 0.0, &mut rng);
        assert!(step.spawned.is_some());
        assert_eq!(s.len(), 1);
        assert_eq!(s.obstacles[0].pos, Vec2::new(800.0, config.obstacle_y()));
        assert_eq!(s.obstacles[0].size, Vec2::new(40.0, 40.0));
        assert_eq!(s.spawn_timer, 0.0);
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let mut s = stream(1200.0);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..59 {
            assert_eq!(s.advance(20.0, 4.0, &mut rng).spawned, None);
        }
        assert!(s.is_empty());
        assert!(s.advance(20.0, 4.0, &mut rng).spawned.is_some());
    }

    #[test]
    fn test_spawn_count_tracks_elapsed_time() {
        let mut s = stream(1200.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawned = 0;
        let mut elapsed = 0.0;
        for _ in 0..600 {
            elapsed += 16.0;
            if s.advance(16.0, 0.0, &mut rng).spawned.is_some() {
                spawned += 1;
            }
            assert_eq!(spawned, (elapsed / 1200.0_f32).floor() as u32);
        }
    }

    #[test]
    fn test_spawn_cadence_does_not_drift() {
        let mut s = stream(1200.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawn_frames = Vec::new();
        for frame in 1..=300 {
            if s.advance(16.0, 0.0, &mut rng).spawned.is_some() {
                spawn_frames.push(frame);
            }
        }
        // 1200ms / 16ms = 75 frames per spawn, every cycle
        assert_eq!(spawn_frames, vec![75, 150, 225, 300]);
    }

    #[test]
    fn test_scroll_is_per_frame() {
        let mut s = stream(1e9);
        let mut rng = Pcg32::seed_from_u64(1);
        s.spawn(ObstacleKind::Log);
        s.advance(1.0, 4.0, &mut rng);
        s.advance(500.0, 4.0, &mut rng);
        assert_eq!(s.obstacles[0].pos.x, 792.0);
    }

    #[test]
    fn test_eviction_exactly_when_past_left_edge() {
        let mut s = stream(1e9);
        let mut rng = Pcg32::seed_from_u64(1);
        s.spawn(ObstacleKind::Bush);
        // 800 + 40 = 840px to travel; at speed 4 the right edge hits 0 after 210 frames
        for _ in 0..210 {
            assert_eq!(s.advance(16.0, 4.0, &mut rng).evicted, 0);
        }
        assert_eq!(s.obstacles[0].pos.x + s.obstacles[0].size.x, 0.0);
        assert_eq!(s.len(), 1);

        let step = s.advance(16.0, 4.0, &mut rng);
        assert_eq!(step.evicted, 1);
        assert!(s.is_empty());
    }

    #[test]
    fn test_eviction_keeps_spawn_order() {
        let mut s = stream(1e9);
        let mut rng = Pcg32::seed_from_u64(1);
        s.spawn(ObstacleKind::Bush);
        s.obstacles[0].pos.x = -30.0;
        s.spawn(ObstacleKind::Log);
        s.spawn(ObstacleKind::Bush);
        s.obstacles[2].pos.x = 400.0;

        let step = s.advance(16.0, 20.0, &mut rng);
        assert_eq!(step.evicted, 1);
        let kinds: Vec<_> = s.obstacles.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![ObstacleKind::Log, ObstacleKind::Bush]);
    }

    #[test]
    fn test_random_kind_covers_both() {
        let mut rng = Pcg32::seed_from_u64(42);
        let picks: Vec<_> = (0..64).map(|_| ObstacleKind::random(&mut rng)).collect();
        assert!(picks.contains(&ObstacleKind::Bush));
        assert!(picks.contains(&ObstacleKind::Log));
    }

    #[test]
    fn test_clear() {
        let mut s = stream(1200.0);
        let mut rng = Pcg32::seed_from_u64(1);
        s.spawn(ObstacleKind::Log);
        s.advance(500.0, 4.0, &mut rng);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.spawn_timer, 0.0);
    }

    #[test]
    fn test_sprite_names() {
        assert_eq!(ObstacleKind::Bush.sprite_name(), "bush_obstacle");
        assert_eq!(ObstacleKind::Log.sprite_name(), "log_obstacle");
    }
}
