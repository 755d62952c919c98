//! Panther Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use web_sys::{HtmlImageElement, Window};

    use panther_run::assets::{self, AssetCache};
    use panther_run::platform::web::{AnimationFrameSource, bind_input, load_images};
    use panther_run::platform::{LoopControl, TickSource};
    use panther_run::renderer::{CanvasRenderer, DomScoreDisplay};
    use panther_run::{Game, GameConfig, SetupError};

    const CANVAS_ID: &str = "gameCanvas";
    const SCORE_ID: &str = "scoreDisplay";

    type SharedGame = Rc<RefCell<Game<CanvasRenderer, DomScoreDisplay>>>;

    /// requestAnimationFrame loop that can park itself and be resumed by input
    #[derive(Clone)]
    struct FrameLoop {
        window: Window,
        game: SharedGame,
        images: AssetCache<HtmlImageElement>,
        scheduled: Rc<Cell<bool>>,
    }

    impl FrameLoop {
        /// Start scheduling frames unless already scheduled
        fn ensure_running(&self) {
            if self.scheduled.replace(true) {
                return;
            }

            let this = self.clone();
            AnimationFrameSource::new(self.window.clone()).run(Box::new(move |now| {
                let settled = this.images.is_settled();
                let mut game = this.game.borrow_mut();
                if game.state.config.wait_for_assets && !settled {
                    return LoopControl::Continue;
                }

                game.frame(now);
                let control = game.loop_control(settled);
                if control == LoopControl::Stop {
                    this.scheduled.set(false);
                }
                control
            }));
        }
    }

    pub fn run() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| SetupError::MissingElement(CANVAS_ID.to_string()))?;

        let images = AssetCache::new();
        let renderer = CanvasRenderer::from_document(&document, CANVAS_ID, images.clone())?;

        // The canvas is the playfield when the sprites fit on it
        let config = GameConfig::from_page(
            canvas.get_attribute("data-preset").as_deref(),
            canvas.get_attribute("data-config").as_deref(),
        );
        let (width, height) = renderer.size();
        let config = match config.with_field(width as f32, height as f32) {
            Ok(sized) => sized,
            Err(e) => {
                log::warn!(
                    "Canvas {}x{} does not fit the tuning ({}), keeping {}x{}",
                    width,
                    height,
                    e,
                    config.field_width,
                    config.field_height
                );
                config
            }
        };

        load_images(&images, assets::MANIFEST);

        let score_display = DomScoreDisplay::from_document(&document, SCORE_ID);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed, renderer, score_display)));
        log::info!("Game initialized with seed: {}", seed);

        let frame_loop = FrameLoop {
            window,
            game,
            images,
            scheduled: Rc::new(Cell::new(false)),
        };

        {
            let frame_loop = frame_loop.clone();
            bind_input(&document, &canvas, move || {
                frame_loop.game.borrow_mut().input();
                frame_loop.ensure_running();
            });
        }

        frame_loop.ensure_running();
        log::info!("Panther Run running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Panther Run starting...");
    if let Err(e) = wasm_game::run() {
        log::error!("Setup failed, game not started: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde::Serialize;

    use panther_run::platform::{FixedStepSource, LoopControl, TickSource};
    use panther_run::renderer::{LogScoreDisplay, NullRenderer};
    use panther_run::sim::{GamePhase, autopilot};
    use panther_run::{Game, GameConfig, Preset};

    /// ~60 Hz display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub preset: &'static str,
        pub frames: u64,
        pub sessions: Vec<u64>,
        pub best: u64,
    }

    /// Let the autopilot play `frames` frames, restarting after each crash
    pub fn run(preset: Preset, frames: u64, seed: u64) -> RunSummary {
        let config = GameConfig::from_preset(preset);
        let game = Rc::new(RefCell::new(Game::new(config, seed, NullRenderer, LogScoreDisplay)));
        let sessions = Rc::new(RefCell::new(Vec::new()));

        {
            let game = game.clone();
            let sessions = sessions.clone();
            FixedStepSource::new(FRAME_MS, frames).run(Box::new(move |now| {
                let mut g = game.borrow_mut();
                match g.phase() {
                    GamePhase::Idle => g.input(),
                    GamePhase::GameOver => {
                        sessions.borrow_mut().push(g.state.score);
                        g.input();
                    }
                    GamePhase::Running => {
                        if autopilot::wants_jump(&g.state) {
                            g.input();
                        }
                    }
                }
                g.frame(now);
                LoopControl::Continue
            }));
        }

        let mut sessions = sessions.take();
        let g = game.borrow();
        if g.phase() == GamePhase::Running {
            sessions.push(g.state.score);
        }
        let best = sessions.iter().copied().max().unwrap_or(0);
        RunSummary {
            preset: preset.as_str(),
            frames,
            sessions,
            best,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Panther Run (native) starting...");
    log::info!("Native mode plays a headless autopilot demo - serve the wasm build for the real game");

    let mut args = std::env::args().skip(1);
    let preset = match args.next() {
        Some(name) => match panther_run::Preset::from_str(&name) {
            Some(preset) => preset,
            None => {
                log::error!("Unknown preset '{}', expected 'final' or 'classic'", name);
                std::process::exit(2);
            }
        },
        None => panther_run::Preset::default(),
    };
    let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let summary = headless::run(preset, frames, 0x5EED);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
