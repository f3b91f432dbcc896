#![deny(unsafe_code)]
//! Core types and traits for the particle-field animated background.
//!
//! Provides the `Engine` trait and `HostEvent`, the `RunLoop` that drives an
//! engine frame by frame, the `Surface` drawing abstraction with a
//! `RecordingSurface`, `Rgba` colors, the `Xorshift64` PRNG, JSON parameter
//! helpers, and the serializable `Scene`.

pub mod color;
pub mod engine;
pub mod error;
pub mod params;
pub mod prng;
pub mod run_loop;
pub mod scene;
pub mod surface;

pub use color::Rgba;
pub use engine::{Engine, HostEvent};
pub use error::EngineError;
pub use prng::Xorshift64;
pub use run_loop::{FixedFrames, FrameScheduler, RunLoop};
pub use scene::Scene;
pub use surface::{
    dimensions_allowed, ColorStop, DrawCommand, RadialGradient, RecordingSurface, Rect, Surface,
    MAX_SURFACE_PIXELS,
};
