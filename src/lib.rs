//! Breakout - a single-screen arcade brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, round state)
//! - `game`: Fixed-tick orchestrator wiring the simulation to a platform
//! - `platform`: Collaborator traits (surface, audio, input, pacing) and headless impls
//! - `renderer`: Scene description and WebGPU rendering pipeline
//! - `config`: Data-driven round parameters

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, RoundConfig};
pub use game::{Game, RunOutcome};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 40;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical canvas size
    pub const SCREEN_WIDTH: i32 = 581;
    pub const SCREEN_HEIGHT: i32 = 624;

    /// Brick grid layout
    pub const BRICK_ROWS: u32 = 6;
    pub const BRICK_COLS: u32 = 9;
    pub const BRICK_WIDTH: i32 = 50;
    pub const BRICK_HEIGHT: i32 = 20;
    pub const BRICK_GAP: i32 = 10;
    pub const BRICK_ORIGIN_X: i32 = 25;
    pub const BRICK_ORIGIN_Y: i32 = 20;
    /// Rows below this index need two hits
    pub const ARMORED_ROWS: u32 = 2;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 90;
    pub const PADDLE_HEIGHT: i32 = 11;
    /// Distance from the bottom of the screen to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: i32 = 40;
    /// Pseudo-depth turning the impact offset into an angle
    pub const PADDLE_DEPTH: f64 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 10;
    /// Speed after a paddle rebound (pixels per tick)
    pub const BALL_REBOUND_SPEED: i32 = 15;
    /// Gap between ball bottom and paddle top while resting
    pub const BALL_IDLE_GAP: i32 = 5;
    /// Gap between ball bottom and paddle top at launch
    pub const BALL_LAUNCH_GAP: i32 = 2;

    /// Life tokens
    pub const LIVES: u32 = 10;
    pub const LIFE_TOKEN_SIZE: i32 = 20;
    pub const LIFE_TOKEN_SPACING: i32 = 5;
    pub const LIFE_TOKEN_X: i32 = 10;
    /// Distance from the bottom of the screen to the token row
    pub const LIFE_TOKEN_BOTTOM_OFFSET: i32 = 30;

    /// How long the end banner stays up (milliseconds)
    pub const END_BANNER_HOLD_MS: u64 = 2000;
}

/// Truncate a float toward zero into pixel units
#[inline]
pub fn trunc_px(v: f64) -> i32 {
    v as i32
}
