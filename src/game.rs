//! Host-agnostic frame driver
//!
//! `Game` owns the session and its collaborators. A tick source calls
//! `frame` with a timestamp; input handlers call `input`. Neither needs to
//! know whether it runs in a browser.

use crate::config::GameConfig;
use crate::platform::{FrameTimer, LoopControl};
use crate::renderer::{Renderer, ScoreDisplay};
use crate::sim::{GameEvent, GamePhase, GameState, tick};

pub struct Game<R, D> {
    pub state: GameState,
    timer: FrameTimer,
    renderer: R,
    score_display: D,
    shown_score: Option<u64>,
}

impl<R: Renderer, D: ScoreDisplay> Game<R, D> {
    pub fn new(config: GameConfig, seed: u64, renderer: R, mut score_display: D) -> Self {
        let timer = FrameTimer::new(config.max_frame_ms);
        score_display.show_score(0);
        Self {
            state: GameState::new(config, seed),
            timer,
            renderer,
            score_display,
            shown_score: Some(0),
        }
    }

    /// The single input entry point (key, click or tap)
    pub fn input(&mut self) {
        let before = self.state.phase;
        self.state.handle_input();
        if before != GamePhase::Running && self.state.phase == GamePhase::Running {
            // First frame of a new session measures from the next callback
            self.timer.reset();
        }
    }

    /// One update and render pass for the frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.timer.delta(now_ms);
        tick(&mut self.state, dt);

        if self.state.drain_events().contains(&GameEvent::Started) {
            // Force a refresh even if the score was already 0
            self.shown_score = None;
        }

        if self.shown_score != Some(self.state.score) {
            self.score_display.show_score(self.state.score);
            self.shown_score = Some(self.state.score);
        }

        self.renderer.render(&self.state);
    }

    /// Whether the frame source should keep calling back after this frame.
    /// With `stop_when_idle`, frames stop outside a session once every asset
    /// has settled; the next input has to schedule them again.
    pub fn loop_control(&self, assets_settled: bool) -> LoopControl {
        if self.state.config.stop_when_idle && !self.state.is_running() && assets_settled {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn score_display(&self) -> &D {
        &self.score_display
    }
}
