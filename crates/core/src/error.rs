//! Error types for the particle-field core.

use thiserror::Error;

/// Errors produced by operations around the simulation.
///
/// The per-frame simulation itself never fails; these cover construction,
/// configuration and output.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, or the pixel count exceeds
    /// [`MAX_SURFACE_PIXELS`](crate::surface::MAX_SURFACE_PIXELS).
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A headless run asked for more than `Scene::MAX_FRAMES` frames.
    #[error("too many frames: {0} (limit {limit})", limit = crate::scene::Scene::MAX_FRAMES)]
    TooManyFrames(usize),

    /// A preset name did not match any known preset.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing output (PNG snapshot, scene file) failed.
    #[error("i/o error: {0}")]
    Io(String),
}
