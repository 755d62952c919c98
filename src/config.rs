//! Game tuning and presets
//!
//! Both shipped variants of the game share one simulation; they differ only in
//! the numbers collected here.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Larger sprites, slower spawns, loop waits for assets
    #[default]
    Final,
    /// Compact sprites, faster spawns, loop starts immediately
    Classic,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Final => "Final",
            Preset::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "final" => Some(Preset::Final),
            "classic" | "new" => Some(Preset::Classic),
            _ => None,
        }
    }
}

/// Which live stat the HUD shows in the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HudStat {
    #[default]
    Speed,
    Score,
}

/// Complete simulation and presentation tuning
///
/// Distances are in canvas pixels with y growing downward. Times are in
/// milliseconds. `gravity`, `jump_velocity` and the scroll speed are applied
/// once per frame, not scaled by elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Height of the ground strip at the bottom of the field
    pub ground_height: f32,

    // === Scrolling ===
    pub base_speed: f32,
    pub max_speed: f32,
    /// Speed gained per elapsed millisecond
    pub acceleration: f32,
    /// Background scroll relative to obstacle scroll
    pub background_parallax: f32,

    // === Actor ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    /// Hitbox shrink on every side
    pub actor_hitbox_inset: f32,
    /// Time each run-cycle frame is shown
    pub anim_frame_ms: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_hitbox_inset: f32,
    pub spawn_interval_ms: f32,
    pub score_per_obstacle: u64,

    // === Loop ===
    /// Upper bound on the elapsed time fed into a single update
    pub max_frame_ms: f32,
    /// Hold the frame loop until every asset has loaded or failed
    pub wait_for_assets: bool,
    /// Stop scheduling frames outside a session once assets are settled;
    /// input schedules them again
    pub stop_when_idle: bool,
    pub hud: HudStat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Final)
    }
}

impl GameConfig {
    /// Build the tuning for a preset
    pub fn from_preset(preset: Preset) -> Self {
        let shared = Self {
            field_width: 800.0,
            field_height: 300.0,
            ground_height: 20.0,

            base_speed: 4.0,
            max_speed: 10.0,
            acceleration: 0.001,
            background_parallax: 0.3,

            gravity: 0.6,
            jump_velocity: 12.0,
            actor_x: 80.0,
            actor_width: 50.0,
            actor_height: 50.0,
            actor_hitbox_inset: 8.0,
            anim_frame_ms: 120.0,

            obstacle_width: 40.0,
            obstacle_height: 40.0,
            obstacle_hitbox_inset: 4.0,
            spawn_interval_ms: 1800.0,
            score_per_obstacle: 10,

            max_frame_ms: 100.0,
            wait_for_assets: true,
            stop_when_idle: false,
            hud: HudStat::Speed,
        };

        match preset {
            Preset::Final => shared,
            Preset::Classic => Self {
                ground_height: 12.0,
                background_parallax: 0.5,
                actor_x: 50.0,
                actor_width: 44.0,
                actor_height: 47.0,
                actor_hitbox_inset: 5.0,
                anim_frame_ms: 80.0,
                obstacle_width: 32.0,
                obstacle_height: 32.0,
                obstacle_hitbox_inset: 2.0,
                spawn_interval_ms: 1200.0,
                wait_for_assets: false,
                stop_when_idle: true,
                hud: HudStat::Score,
                ..shared
            },
        }
    }

    /// Parse a (possibly partial) JSON object over the default tuning
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_json_over(Preset::default(), json)
    }

    /// Parse a (possibly partial) JSON object over `preset`'s tuning
    pub fn from_json_over(preset: Preset, json: &str) -> Result<Self, ConfigError> {
        let overrides = match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(fields) => fields,
            _ => return Err(ConfigError::Invalid("config must be a JSON object".to_string())),
        };

        let mut merged = serde_json::to_value(Self::from_preset(preset))?;
        if let Some(fields) = merged.as_object_mut() {
            fields.extend(overrides);
        }

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Tuning from an optional preset name and optional JSON overrides, as
    /// a page supplies them. Bad input is logged and skipped.
    pub fn from_page(preset: Option<&str>, overrides: Option<&str>) -> Self {
        let preset = match preset {
            Some(name) => Preset::from_str(name).unwrap_or_else(|| {
                log::warn!("Unknown preset '{}', using {}", name, Preset::default().as_str());
                Preset::default()
            }),
            None => Preset::default(),
        };

        match overrides {
            Some(json) => Self::from_json_over(preset, json).unwrap_or_else(|e| {
                log::warn!("Ignoring config overrides: {}", e);
                Self::from_preset(preset)
            }),
            None => Self::from_preset(preset),
        }
    }

    /// Same tuning on a field of another size, if the sprites still fit
    pub fn with_field(&self, width: f32, height: f32) -> Result<Self, ConfigError> {
        let config = Self {
            field_width: width,
            field_height: height,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("anim_frame_ms", self.anim_frame_ms),
            ("max_frame_ms", self.max_frame_ms),
            ("base_speed", self.base_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.max_speed < self.base_speed {
            return Err(ConfigError::Invalid(format!(
                "max_speed ({}) is below base_speed ({})",
                self.max_speed, self.base_speed
            )));
        }
        if self.acceleration < 0.0 || self.gravity < 0.0 || self.jump_velocity < 0.0 {
            return Err(ConfigError::Invalid(
                "acceleration, gravity and jump_velocity must not be negative".to_string(),
            ));
        }
        if self.actor_hitbox_inset * 2.0 >= self.actor_width.min(self.actor_height)
            || self.obstacle_hitbox_inset * 2.0 >= self.obstacle_width.min(self.obstacle_height)
        {
            return Err(ConfigError::Invalid("hitbox inset swallows the whole sprite".to_string()));
        }
        if self.ground_height < 0.0
            || self.ground_height + self.actor_height.max(self.obstacle_height) > self.field_height
        {
            return Err(ConfigError::Invalid("ground line leaves no room for sprites".to_string()));
        }
        Ok(())
    }

    /// Resting y of the actor's top edge
    pub fn actor_ground_y(&self) -> f32 {
        self.field_height - self.ground_height - self.actor_height
    }

    /// Fixed y of every obstacle's top edge
    pub fn obstacle_y(&self) -> f32 {
        self.field_height - self.ground_height - self.obstacle_height
    }

    /// Top edge of the ground strip
    pub fn ground_line(&self) -> f32 {
        self.field_height - self.ground_height
    }
}
