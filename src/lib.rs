//! Panther Run - an endless runner for the browser
//!
//! Core modules:
//! - `sim`: Simulation (jump physics, obstacle stream, collisions, session state)
//! - `game`: Frame driver tying the simulation to its collaborators
//! - `renderer`: Render and score-display seams (Canvas 2D on the web)
//! - `platform`: Frame timing, scheduling and input mapping
//! - `assets`: Sprite manifest and load-state cache
//! - `config`: Tuning presets

pub mod assets;
pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, HudStat, Preset};
pub use error::{ConfigError, SetupError};
pub use game::Game;
