//! Canvas 2D renderer for the browser build
//!
//! Sprites come from the asset cache; anything not ready is drawn as a flat
//! placeholder so the game stays playable while images load or after they
//! fail.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement};

use super::{Renderer, ScoreDisplay, text};
use crate::assets::{self, AssetCache};
use crate::config::HudStat;
use crate::error::SetupError;
use crate::sim::{GamePhase, GameState, Obstacle, ObstacleKind};

const GOLD: &str = "#DAA520";
const GRASS: &str = "#228B22";
const SKY: &str = "#87CEEB";
const DEEP_GREEN: &str = "#006400";
const BARK: &str = "#8B4513";
const IDLE_SHADE: &str = "rgba(0, 0, 0, 0.7)";
const GAME_OVER_SHADE: &str = "rgba(139, 0, 0, 0.8)";

/// Draws the game onto a `<canvas>` with a 2D context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    images: AssetCache<HtmlImageElement>,
}

impl CanvasRenderer {
    /// Look up `#canvas_id` and grab its 2D context
    pub fn from_document(
        document: &Document,
        canvas_id: &str,
        images: AssetCache<HtmlImageElement>,
    ) -> Result<Self, SetupError> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SetupError::MissingElement(canvas_id.to_string()))?
            .dyn_into()
            .map_err(|_| SetupError::NotACanvas(canvas_id.to_string()))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(SetupError::NoContext2d)?
            .dyn_into()
            .map_err(|_| SetupError::NoContext2d)?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            images,
        })
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Ready image with real pixels, if any
    fn image(&self, name: &str) -> Option<HtmlImageElement> {
        self.images
            .get(name)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    fn draw_image(&self, img: &HtmlImageElement, x: f64, y: f64, w: f64, h: f64) {
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
        {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn fill_text(&self, s: &str, x: f64, y: f64) {
        let _ = self.ctx.fill_text(s, x, y);
    }

    fn draw_background(&self, offset: f64) {
        if let Some(bg) = self.image(assets::BACKGROUND) {
            self.draw_image(&bg, offset, 0.0, self.width, self.height);
            self.draw_image(&bg, offset + self.width, 0.0, self.width, self.height);
            return;
        }

        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        let _ = gradient.add_color_stop(0.0, SKY);
        let _ = gradient.add_color_stop(0.7, GRASS);
        let _ = gradient.add_color_stop(1.0, DEEP_GREEN);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_ground(&self, ground_line: f64, ground_height: f64) {
        if let Some(grass) = self.image(assets::GROUND) {
            let tile = grass.natural_width() as f64;
            let mut x = 0.0;
            while x < self.width + tile {
                self.draw_image(&grass, x, ground_line, tile, ground_height);
                x += tile;
            }
            return;
        }

        self.ctx.set_fill_style_str(GRASS);
        self.ctx.fill_rect(0.0, ground_line, self.width, ground_height);
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) {
        let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
        let (w, h) = (obstacle.size.x as f64, obstacle.size.y as f64);

        if let Some(img) = self.image(obstacle.kind.sprite_name()) {
            self.draw_image(&img, x, y, w, h);
            return;
        }

        let color = match obstacle.kind {
            ObstacleKind::Bush => GRASS,
            ObstacleKind::Log => BARK,
        };
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn draw_actor(&self, state: &GameState) {
        let actor = &state.actor;
        let (x, y) = (actor.pos.x as f64, actor.pos.y as f64);
        let (w, h) = (actor.size.x as f64, actor.size.y as f64);

        if let Some(img) = self.image(&actor.sprite_name()) {
            self.draw_image(&img, x, y, w, h);
            return;
        }

        // Black panther with yellow eyes
        self.ctx.set_fill_style_str("#000");
        self.ctx.fill_rect(x, y, w, h);
        self.ctx.set_fill_style_str(GOLD);
        self.ctx.fill_rect(x + 10.0, y + 10.0, 8.0, 8.0);
        self.ctx.fill_rect(x + 25.0, y + 10.0, 8.0, 8.0);
    }

    fn draw_ui(&self, state: &GameState) {
        let (cx, cy) = (self.width / 2.0, self.height / 2.0);

        self.ctx.set_fill_style_str(GOLD);
        self.ctx.set_font("bold 20px Arial");
        self.ctx.set_text_align("left");
        let hud = match state.config.hud {
            HudStat::Speed => text::speed(state.speed),
            HudStat::Score => text::score(state.score),
        };
        self.fill_text(&hud, 10.0, 30.0);

        match state.phase {
            GamePhase::Running => {}
            GamePhase::Idle => {
                self.ctx.set_fill_style_str(IDLE_SHADE);
                self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

                self.ctx.set_fill_style_str(GOLD);
                self.ctx.set_text_align("center");
                self.ctx.set_font("bold 32px Arial");
                self.fill_text(text::TITLE, cx, cy - 40.0);
                self.ctx.set_font("bold 20px Arial");
                self.fill_text(text::START_PROMPT, cx, cy + 20.0);
            }
            GamePhase::GameOver => {
                self.ctx.set_fill_style_str(GAME_OVER_SHADE);
                self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

                self.ctx.set_fill_style_str(GOLD);
                self.ctx.set_text_align("center");
                self.ctx.set_font("bold 36px Arial");
                self.fill_text(text::GAME_OVER, cx, cy - 30.0);
                self.ctx.set_font("bold 24px Arial");
                self.fill_text(&text::final_score(state.score), cx, cy + 10.0);
                self.ctx.set_font("bold 18px Arial");
                self.fill_text(text::RESTART_PROMPT, cx, cy + 50.0);
            }
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, state: &GameState) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);

        self.draw_background(state.background_offset as f64);
        self.draw_ground(
            state.config.ground_line() as f64,
            state.config.ground_height as f64,
        );
        for obstacle in state.obstacles() {
            self.draw_obstacle(obstacle);
        }
        self.draw_actor(state);
        self.draw_ui(state);
    }
}

/// Writes the score into a DOM element, if the page has one
pub struct DomScoreDisplay {
    element: Option<Element>,
}

impl DomScoreDisplay {
    pub fn from_document(document: &Document, element_id: &str) -> Self {
        let element = document.get_element_by_id(element_id);
        if element.is_none() {
            log::warn!("No #{} element, score display disabled", element_id);
        }
        Self { element }
    }
}

impl ScoreDisplay for DomScoreDisplay {
    fn show_score(&mut self, score: u64) {
        if let Some(el) = &self.element {
            el.set_text_content(Some(&text::score(score)));
        }
    }
}
