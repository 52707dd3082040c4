//! Rendering module
//!
//! `scene` describes a frame independently of any backend; `pipeline`
//! draws it with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Label, Scene, Sprite, SpriteShape};
