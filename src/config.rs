//! Round parameters
//!
//! Everything that shapes a round lives here so a headless test can build a
//! tiny arena (one brick, three lives) without touching the constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Largest accepted screen dimension in pixels
pub const MAX_SCREEN_SIZE: i32 = 8192;
/// Largest accepted brick count
pub const MAX_BRICKS: u32 = 10_000;
/// Largest accepted life count
pub const MAX_LIVES: u32 = 1000;

/// Why a round configuration was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A width/height/radius field was zero or negative
    NonPositive(&'static str),
    /// The grid would contain no bricks
    EmptyGrid,
    /// The round would start with no lives
    NoLives,
    /// A size or position field exceeds what the playfield can hold
    TooLarge(&'static str),
    /// More bricks than `MAX_BRICKS`
    TooManyBricks,
    /// More lives than `MAX_LIVES`
    TooManyLives,
    /// JSON could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(field) => write!(f, "`{field}` must be positive"),
            ConfigError::EmptyGrid => write!(f, "brick grid must have at least one row and column"),
            ConfigError::NoLives => write!(f, "round must start with at least one life"),
            ConfigError::TooLarge(field) => write!(f, "`{field}` is out of range"),
            ConfigError::TooManyBricks => write!(f, "brick grid exceeds {MAX_BRICKS} bricks"),
            ConfigError::TooManyLives => write!(f, "round may start with at most {MAX_LIVES} lives"),
            ConfigError::Parse(msg) => write!(f, "invalid round config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parameters of a single round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub screen_width: i32,
    pub screen_height: i32,

    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_width: i32,
    pub brick_height: i32,
    pub brick_gap: i32,
    pub brick_origin: (i32, i32),

    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Clamp the paddle inside the screen (off lets it slide past the edges like the arcade game)
    pub clamp_paddle: bool,

    pub ball_radius: i32,
    pub rebound_speed: i32,

    pub lives: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_gap: BRICK_GAP,
            brick_origin: (BRICK_ORIGIN_X, BRICK_ORIGIN_Y),

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            clamp_paddle: false,

            ball_radius: BALL_RADIUS,
            rebound_speed: BALL_REBOUND_SPEED,

            lives: LIVES,
        }
    }
}

impl RoundConfig {
    /// Parse a JSON document; missing fields fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every rectangle in the round relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("rebound_speed", self.rebound_speed),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, v)| *v <= 0) {
            return Err(ConfigError::NonPositive(*field));
        }
        if self.screen_width > MAX_SCREEN_SIZE {
            return Err(ConfigError::TooLarge("screen_width"));
        }
        if self.screen_height > MAX_SCREEN_SIZE {
            return Err(ConfigError::TooLarge("screen_height"));
        }

        // Everything else must fit on the screen
        let bounded = [
            ("brick_width", self.brick_width, self.screen_width),
            ("brick_height", self.brick_height, self.screen_height),
            ("brick_gap", self.brick_gap.abs(), self.screen_width),
            ("brick_origin.x", self.brick_origin.0.abs(), self.screen_width),
            ("brick_origin.y", self.brick_origin.1.abs(), self.screen_height),
            ("paddle_width", self.paddle_width, self.screen_width),
            ("paddle_height", self.paddle_height, self.screen_height),
            ("ball_radius", self.ball_radius, self.screen_width.min(self.screen_height) / 2),
            ("rebound_speed", self.rebound_speed, self.screen_height),
        ];
        if let Some((field, _, _)) = bounded.iter().find(|(_, v, max)| *v > *max) {
            return Err(ConfigError::TooLarge(*field));
        }

        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        match self.brick_rows.checked_mul(self.brick_cols) {
            Some(count) if count <= MAX_BRICKS => {}
            _ => return Err(ConfigError::TooManyBricks),
        }

        if self.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.lives > MAX_LIVES {
            return Err(ConfigError::TooManyLives);
        }
        Ok(())
    }
}
