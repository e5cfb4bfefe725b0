//! Game configuration
//!
//! Field geometry and physics tuning. Every value has a default matching the
//! classic layout; a JSON document may override any subset of them.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Aabb;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunable inputs to the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Player top edge when grounded
    pub ground_y: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Defeated pose (render only) ===
    pub defeated_y: f32,
    pub defeated_width: f32,
    pub defeated_height: f32,

    // === Obstacles ===
    pub obstacle_y: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,

    // === Physics (per tick) ===
    pub gravity: f32,
    pub jump_impulse: f32,
    pub scroll_speed: f32,
    pub spawn_probability: f64,

    // === Timing ===
    pub tick_rate_hz: f32,
    pub max_substeps: u32,

    // === HUD ===
    pub title: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_y: GROUND_Y,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            defeated_y: DEFEATED_Y,
            defeated_width: DEFEATED_WIDTH,
            defeated_height: DEFEATED_HEIGHT,

            obstacle_y: OBSTACLE_Y,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            scroll_speed: SCROLL_SPEED,
            spawn_probability: SPAWN_PROBABILITY,

            tick_rate_hz: TICK_RATE_HZ,
            max_substeps: MAX_SUBSTEPS,

            title: TITLE.to_string(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the values describe a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("defeated_width", self.defeated_width)?;
        positive("defeated_height", self.defeated_height)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_height", self.obstacle_height)?;
        positive("gravity", self.gravity)?;
        positive("scroll_speed", self.scroll_speed)?;
        if !(1.0..=1000.0).contains(&self.tick_rate_hz) {
            return Err(ConfigError::Invalid {
                field: "tick_rate_hz",
                reason: "must lie in [1, 1000]",
            });
        }

        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Err(ConfigError::Invalid {
                field: "jump_impulse",
                reason: "must be negative (upward)",
            });
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::Invalid {
                field: "spawn_probability",
                reason: "must lie in [0, 1]",
            });
        }
        if !(self.ground_y.is_finite() && self.ground_y >= 0.0)
            || self.ground_y + self.player_height > self.field_height
        {
            return Err(ConfigError::Invalid {
                field: "ground_y",
                reason: "player must stand inside the field",
            });
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Duration of one simulation tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.tick_rate_hz)
    }

    /// Player box at its start position (grounded)
    pub fn player_start(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.player_x, self.ground_y),
            Vec2::new(self.player_width, self.player_height),
        )
    }

    /// Box of a freshly spawned obstacle at horizontal position `x`
    pub fn obstacle_at(&self, x: f32) -> Aabb {
        Aabb::new(
            Vec2::new(x, self.obstacle_y),
            Vec2::new(self.obstacle_width, self.obstacle_height),
        )
    }

    /// Where the defeated pose is drawn for a player at horizontal position `x`
    pub fn defeated_box(&self, x: f32) -> Aabb {
        Aabb::new(
            Vec2::new(x, self.defeated_y),
            Vec2::new(self.defeated_width, self.defeated_height),
        )
    }
}
