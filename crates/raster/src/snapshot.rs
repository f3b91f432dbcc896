//! PNG output of a rendered [`Raster`].
//!
//! Feature-gated behind `png` (default on) so WASM builds can depend on this
//! crate without pulling in `image`.

use crate::pixel::to_rgba8;
use crate::Raster;
use particle_field_core::error::EngineError;
use particle_field_core::{Rgba, Surface};
use std::path::Path;

/// Writes the raster composited over `background` as a PNG.
///
/// Returns `EngineError::Io` if encoding or writing fails.
pub fn write_png(raster: &Raster, background: Rgba, path: &Path) -> Result<(), EngineError> {
    let rgba = to_rgba8(raster, background);
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))
}
