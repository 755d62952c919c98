//! Session state and lifecycle triggers
//!
//! `GameState` is the single owner of everything that changes between
//! frames. Input handlers and the frame loop both go through it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::{Obstacle, ObstacleKind, ObstacleStream, StreamStep};
use crate::config::GameConfig;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first input
    Idle,
    /// Active gameplay
    Running,
    /// Actor hit an obstacle; waiting for restart input
    GameOver,
}

/// Notable things that happened since the last drain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session (re)started
    Started,
    Jumped,
    Landed,
    Spawned(ObstacleKind),
    /// An obstacle left the field and paid out
    Cleared { bonus: u64 },
    /// Session ended
    Collision { score: u64 },
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// One play-through plus the idle/game-over screens around it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed used for obstacle kind selection
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Horizontal scroll per frame
    pub speed: f32,
    pub actor: Actor,
    pub stream: ObstacleStream,
    /// Cosmetic background scroll, in `(-field_width, 0]`
    pub background_offset: f32,
    /// Frames simulated in the current session
    pub frames: u64,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state in the `Idle` phase
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            speed: config.base_speed,
            actor: Actor::new(&config),
            stream: ObstacleStream::new(&config),
            background_offset: 0.0,
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            config,
        }
    }

    /// Begin a session. Also used for restart: both leave the state
    /// identical apart from the RNG position.
    pub fn start(&mut self) {
        self.score = 0;
        self.speed = self.config.base_speed;
        self.stream.clear();
        self.actor.reset();
        self.background_offset = 0.0;
        self.frames = 0;
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Started);
        log::info!("Session started");
    }

    pub fn restart(&mut self) {
        self.start();
    }

    /// Jump, if a session is running and the actor is on the ground
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let jumped = self.actor.trigger_jump();
        if jumped {
            self.push_event(GameEvent::Jumped);
        }
        jumped
    }

    /// The one input trigger: start, jump or restart depending on phase
    pub fn handle_input(&mut self) {
        match self.phase {
            GamePhase::Idle => self.start(),
            GamePhase::Running => {
                self.jump();
            }
            GamePhase::GameOver => self.restart(),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.stream.obstacles
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Run the obstacle stream with the session's RNG
    pub(crate) fn advance_stream(&mut self, dt_ms: f32) -> StreamStep {
        self.stream.advance(dt_ms, self.speed, &mut self.rng)
    }
}
