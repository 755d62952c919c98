//! Presentation seams
//!
//! The simulation never draws. Once per frame the driver hands the whole
//! `GameState` to a `Renderer`, and score changes to a `ScoreDisplay`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, DomScoreDisplay};

use crate::sim::GameState;

/// Draws one frame from the current state
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Shows the running score somewhere outside the playfield
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u64);
}

/// Renderer for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Score display that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogScoreDisplay;

impl ScoreDisplay for LogScoreDisplay {
    fn show_score(&mut self, score: u64) {
        log::debug!("Score: {}", score);
    }
}

/// UI copy shared by renderers
pub mod text {
    pub const TITLE: &str = "PANTHER IN THE PANTANAL";
    pub const START_PROMPT: &str = "Press SPACE, click or tap to start!";
    pub const GAME_OVER: &str = "GAME OVER";
    pub const RESTART_PROMPT: &str = "Press SPACE to play again";

    pub fn score(score: u64) -> String {
        format!("Score: {}", score)
    }

    pub fn final_score(score: u64) -> String {
        format!("Final score: {}", score)
    }

    pub fn speed(speed: f32) -> String {
        format!("Speed: {:.1}", speed)
    }
}
