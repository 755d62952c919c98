//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame timing (elapsed time between callbacks)
//! - Frame scheduling (display refresh in the browser, a fixed step elsewhere)
//! - Input mapping

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Whether a tick source should keep calling back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Something that calls `on_frame` with a timestamp (ms) once per frame
pub trait TickSource {
    fn run(self, on_frame: Box<dyn FnMut(f64) -> LoopControl>);
}

/// Synchronous source with evenly spaced timestamps, for tests and headless runs
#[derive(Debug, Clone, Copy)]
pub struct FixedStepSource {
    pub start_ms: f64,
    pub step_ms: f64,
    /// Stop after this many frames even if the callback wants more
    pub max_frames: u64,
}

impl FixedStepSource {
    pub fn new(step_ms: f64, max_frames: u64) -> Self {
        Self {
            start_ms: 0.0,
            step_ms,
            max_frames,
        }
    }
}

impl TickSource for FixedStepSource {
    fn run(self, mut on_frame: Box<dyn FnMut(f64) -> LoopControl>) {
        for frame in 0..self.max_frames {
            let now = self.start_ms + frame as f64 * self.step_ms;
            if on_frame(now) == LoopControl::Stop {
                break;
            }
        }
    }
}

/// Turns frame timestamps into elapsed milliseconds
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last_ms: Option<f64>,
    max_delta_ms: f32,
}

impl FrameTimer {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last_ms: None,
            max_delta_ms,
        }
    }

    /// Forget the previous timestamp; the next `delta` returns 0
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Elapsed time since the previous call, clamped to `[0, max_delta_ms]`
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, self.max_delta_ms)
    }
}

/// The game's only input action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Start, jump or restart depending on phase
    Trigger,
}

impl InputAction {
    /// Map a `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" => Some(InputAction::Trigger),
            _ => None,
        }
    }
}
