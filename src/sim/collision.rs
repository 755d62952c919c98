//! Axis-aligned hitbox tests
//!
//! Sprites are drawn slightly larger than their hitboxes, so near misses
//! read as misses on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.w - 2.0 * amount,
            self.h - 2.0 * amount,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap on both axes; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Index of the first obstacle (in spawn order) whose hitbox overlaps `actor_box`
pub fn first_collision(actor_box: &Rect, obstacles: &[Obstacle], obstacle_inset: f32) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| actor_box.overlaps(&obstacle.collision_box(obstacle_inset)))
}

/// True if any obstacle's hitbox overlaps `actor_box`
pub fn any_collision(actor_box: &Rect, obstacles: &[Obstacle], obstacle_inset: f32) -> bool {
    first_collision(actor_box, obstacles, obstacle_inset).is_some()
}
