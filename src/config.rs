//! Game tuning and preferences
//!
//! Every section has a `Default`, so a JSON document only needs the fields it
//! wants to change.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Logical playfield size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Thickness of the left/right/top walls (outside the field)
    pub wall_thickness: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            wall_thickness: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom of the field to the paddle center
    pub bottom_offset: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 16.0,
            bottom_offset: 40.0,
        }
    }
}

impl PaddleConfig {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Above 1 on purpose: bounces gain energy, `speed_limit` keeps it bounded
    pub restitution: f32,
    pub friction: f32,
    pub friction_air: f32,
    /// Launch speed (units per base step)
    pub launch_speed: f32,
    /// Hard cap on ball speed (units per base step)
    pub speed_limit: f32,
    /// Max launch deviation from straight up (radians)
    pub launch_jitter: f32,
    /// Distance from the bottom of the field to the spawn point
    pub spawn_offset: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            restitution: 1.2,
            friction: 0.0,
            friction_air: 0.0,
            launch_speed: 10.0,
            speed_limit: 17.0,
            launch_jitter: 0.25,
            spawn_offset: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub rows: usize,
    pub cols: usize,
    pub height: f32,
    /// Gap between bricks and between the grid and the side walls
    pub gap: f32,
    /// Distance from the top of the field to the top of the first row
    pub top_offset: f32,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 8,
            height: 25.0,
            gap: 10.0,
            top_offset: 60.0,
        }
    }
}

/// Round rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub initial_lives: u32,
    /// Points per row, multiplied by the row's distance from the bottom of the grid
    pub points_per_row: u32,
    pub respawn_delay_ms: f32,
    /// How far below the field the ball must fall before it counts as lost
    pub out_of_bounds_margin: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_lives: 5,
            points_per_row: 10,
            respawn_delay_ms: 1000.0,
            out_of_bounds_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub enabled: bool,
    pub burst_count: usize,
    /// Velocity range per axis is `-max_speed..max_speed`
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_decay: f32,
    pub max_decay: f32,
    pub gravity: f32,
    pub max_particles: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            burst_count: 15,
            max_speed: 4.0,
            min_size: 2.0,
            max_size: 5.0,
            min_decay: 0.015,
            max_decay: 0.035,
            gravity: 0.1,
            max_particles: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub rules: RulesConfig,
    pub particles: ParticleConfig,
    pub audio: AudioConfig,
}

impl GameConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the rules can not work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field.width <= 0.0 || self.field.height <= 0.0 {
            return Err(ConfigError::invalid("field", "width and height must be positive"));
        }
        if self.paddle.width <= 0.0 || self.paddle.width >= self.field.width {
            return Err(ConfigError::invalid(
                "paddle.width",
                "must be positive and narrower than the field",
            ));
        }
        if self.ball.radius <= 0.0 {
            return Err(ConfigError::invalid("ball.radius", "must be positive"));
        }
        if self.ball.launch_speed <= 0.0 {
            return Err(ConfigError::invalid("ball.launch_speed", "must be positive"));
        }
        if self.ball.speed_limit < self.ball.launch_speed {
            return Err(ConfigError::invalid(
                "ball.speed_limit",
                "must be at least ball.launch_speed",
            ));
        }
        if self.bricks.rows == 0 || self.bricks.cols == 0 {
            return Err(ConfigError::invalid("bricks", "rows and cols must be non-zero"));
        }
        if self.bricks.height <= 0.0 || self.bricks.gap < 0.0 {
            return Err(ConfigError::invalid("bricks", "height must be positive, gap non-negative"));
        }
        if self.brick_width() <= 0.0 {
            return Err(ConfigError::invalid("bricks.cols", "grid does not fit the field width"));
        }
        if self.rules.initial_lives == 0 {
            return Err(ConfigError::invalid("rules.initial_lives", "must be at least 1"));
        }
        if self.particles.min_size > self.particles.max_size
            || self.particles.min_decay > self.particles.max_decay
            || self.particles.min_decay <= 0.0
            || self.particles.max_speed < 0.0
        {
            return Err(ConfigError::invalid(
                "particles",
                "ranges must be ordered and decay positive",
            ));
        }
        let volumes = [self.audio.master_volume, self.audio.sfx_volume];
        if volumes.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(ConfigError::invalid("audio", "volumes must be within 0.0 - 1.0"));
        }
        Ok(())
    }

    /// Width of a single brick, derived from the field width, columns and gap
    pub fn brick_width(&self) -> f32 {
        let cols = self.bricks.cols as f32;
        (self.field.width - self.bricks.gap * (cols + 1.0)) / cols
    }

    /// Paddle center at the start of a round
    pub fn paddle_home(&self) -> Vec2 {
        Vec2::new(
            self.field.width / 2.0,
            self.field.height - self.paddle.bottom_offset,
        )
    }

    /// Where new balls appear
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(
            self.field.width / 2.0,
            self.field.height - self.ball.spawn_offset,
        )
    }

    /// y beyond which a live ball counts as lost
    pub fn out_of_bounds_y(&self) -> f32 {
        self.field.height + self.rules.out_of_bounds_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rules.initial_lives, 5);
        assert_eq!(config.ball.speed_limit, 17.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "rules": { "initial_lives": 3 } }"#).unwrap();
        assert_eq!(config.rules.initial_lives, 3);
        assert_eq!(config.rules.points_per_row, 10);
        assert_eq!(config.bricks.rows, 6);
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = GameConfig::from_json(r#"{ "rules": { "initial_lives": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "rules.initial_lives",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_speed_limit_below_launch() {
        let json = r#"{ "ball": { "launch_speed": 12.0, "speed_limit": 8.0 } }"#;
        assert!(GameConfig::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_overfull_grid() {
        let json = r#"{ "bricks": { "cols": 80, "gap": 10.0 } }"#;
        assert!(GameConfig::from_json(json).is_err());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_json_roundtrip_preserves_tuning() {
        let mut config = GameConfig::default();
        config.ball.launch_jitter = 0.2;
        let json = config.to_json().unwrap();
        let back = GameConfig::from_json(&json).unwrap();
        assert_eq!(back.ball.launch_jitter, 0.2);
    }

    #[test]
    fn test_derived_geometry() {
        let config = GameConfig::default();
        // (800 - 10 * 9) / 8
        assert!((config.brick_width() - 88.75).abs() < 1e-4);
        assert_eq!(config.ball_spawn(), Vec2::new(400.0, 500.0));
        assert_eq!(config.paddle_home(), Vec2::new(400.0, 560.0));
        assert_eq!(config.out_of_bounds_y(), 650.0);
    }
}
