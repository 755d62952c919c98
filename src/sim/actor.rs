//! The running panther: jump arc and run-cycle animation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::GameConfig;

/// Number of frames in the run cycle
pub const RUN_FRAMES: u8 = 4;

/// The player-controlled runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in pixels per frame (negative is up)
    pub velocity_y: f32,
    pub airborne: bool,
    /// Resting y on the ground line
    pub ground_y: f32,
    /// Current run-cycle frame, `0..RUN_FRAMES`
    pub anim_frame: u8,
    anim_timer: f32,
    jump_velocity: f32,
    gravity: f32,
    anim_frame_ms: f32,
}

impl Actor {
    pub fn new(config: &GameConfig) -> Self {
        let ground_y = config.actor_ground_y();
        Self {
            pos: Vec2::new(config.actor_x, ground_y),
            size: Vec2::new(config.actor_width, config.actor_height),
            velocity_y: 0.0,
            airborne: false,
            ground_y,
            anim_frame: 0,
            anim_timer: 0.0,
            jump_velocity: config.jump_velocity,
            gravity: config.gravity,
            anim_frame_ms: config.anim_frame_ms,
        }
    }

    /// Start a jump from the ground. Returns false (and changes nothing) if
    /// already in the air.
    pub fn trigger_jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.airborne = true;
        self.velocity_y = -self.jump_velocity;
        true
    }

    /// Advance one frame. Returns true if the actor touched down this frame.
    ///
    /// Gravity is applied once per call whatever `dt_ms` is; only the run
    /// animation is time-based.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.anim_timer += dt_ms;
        if self.anim_timer > self.anim_frame_ms {
            self.anim_frame = (self.anim_frame + 1) % RUN_FRAMES;
            self.anim_timer = 0.0;
        }

        if !self.airborne {
            return false;
        }

        self.velocity_y += self.gravity;
        self.pos.y += self.velocity_y;

        if self.pos.y >= self.ground_y {
            self.pos.y = self.ground_y;
            self.airborne = false;
            self.velocity_y = 0.0;
            return true;
        }
        false
    }

    /// Back to ground rest with a fresh run cycle
    pub fn reset(&mut self) {
        self.pos.y = self.ground_y;
        self.velocity_y = 0.0;
        self.airborne = false;
        self.anim_frame = 0;
        self.anim_timer = 0.0;
    }

    /// Full sprite rectangle
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Hitbox, shrunk on every side by `inset`
    pub fn collision_box(&self, inset: f32) -> Rect {
        self.bounds().inset(inset)
    }

    /// Asset key for the current run-cycle frame
    pub fn sprite_name(&self) -> String {
        format!("panther_run_{}", self.anim_frame + 1)
    }
}
