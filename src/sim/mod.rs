//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by brick id)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod bricks;
pub mod lives;
pub mod paddle;
pub mod rect;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallState};
pub use bricks::{Brick, BrickHit, build_grid};
pub use lives::LifeCounter;
pub use paddle::Paddle;
pub use rect::{Rect, intersects};
pub use state::{GameEvent, RngState, RoundOutcome, RoundState};
pub use tick::{TickInput, tick};
