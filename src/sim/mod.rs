//! Game simulation
//!
//! All gameplay logic lives here. Nothing in this module draws, loads assets
//! or touches the browser:
//! - Elapsed time is passed in by the caller
//! - Obstacle kinds come from a seeded RNG
//! - Obstacles are kept in spawn order

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::{Actor, RUN_FRAMES};
pub use collision::{Rect, any_collision, first_collision};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleStream, StreamStep};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
