//! Platform abstraction layer
//!
//! The orchestrator only talks to these traits:
//! - `Surface`: presents a rendered scene
//! - `AudioOut`: music loop and one-shot cues
//! - `InputSource`: pointer/quit events, polled once per frame
//! - `FramePacer`: fixed-rate frame waits
//!
//! Handles are acquired once at startup and released on drop.

use std::fmt;
use std::time::Duration;

use crate::renderer::Scene;

pub mod headless;

/// Input events consumed by the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer moved to logical x position
    PointerMoved { x: i32 },
    /// Pointer button released
    PointerReleased,
    /// Window closed / user asked to quit
    Quit,
}

/// One-shot audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Brick destroyed
    Pop,
    /// Ball lost
    LifeLost,
    /// Round won
    Win,
    /// Round lost
    Lose,
}

/// Failure to put a frame on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentError {
    /// Surface must be reconfigured before the next frame
    Lost,
    OutOfMemory,
    Other(String),
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::Lost => write!(f, "surface lost"),
            PresentError::OutOfMemory => write!(f, "out of memory"),
            PresentError::Other(msg) => write!(f, "present failed: {msg}"),
        }
    }
}

impl std::error::Error for PresentError {}

pub trait Surface {
    fn present(&mut self, scene: &Scene) -> Result<(), PresentError>;
}

pub trait AudioOut {
    /// Start the background loop
    fn start_music(&mut self);
    fn stop_music(&mut self);
    fn play(&mut self, cue: AudioCue);
}

pub trait InputSource {
    /// Drain pending events without blocking
    fn poll(&mut self) -> Vec<InputEvent>;
}

pub trait FramePacer {
    /// Block until the next tick is due
    fn wait_tick(&mut self);
    /// Block for a fixed delay (end-of-round banner)
    fn hold(&mut self, duration: Duration);
}
