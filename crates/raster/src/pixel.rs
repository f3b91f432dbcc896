//! Flattening a [`Raster`] into 8-bit RGBA.
//!
//! Always available (no feature gate) so both the PNG path and any embedding
//! host that wants raw bytes share one conversion.

use crate::Raster;
use particle_field_core::Rgba;

/// Composites the raster over an opaque `background` and returns RGBA8 bytes
/// (`width * height * 4`, alpha always 255).
///
/// The background's own alpha is ignored; the page behind a canvas is
/// always opaque.
pub fn to_rgba8(raster: &Raster, background: Rgba) -> Vec<u8> {
    let [br, bg, bb, _] = background.to_unit();
    let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    raster
        .data()
        .iter()
        .flat_map(|&[r, g, b, a]| {
            let keep = 1.0 - a;
            [
                quantize(r + br * keep),
                quantize(g + bg * keep),
                quantize(b + bb * keep),
                255u8,
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use particle_field_core::Surface;

    #[test]
    fn to_rgba8_correct_length() {
        let raster = Raster::new(8, 4).unwrap();
        assert_eq!(to_rgba8(&raster, Rgba::rgb(0, 0, 0)).len(), 8 * 4 * 4);
    }

    #[test]
    fn empty_raster_shows_background() {
        let raster = Raster::new(2, 2).unwrap();
        let buf = to_rgba8(&raster, Rgba::rgb(10, 20, 30));
        for px in buf.chunks(4) {
            assert_eq!(px, [10, 20, 30, 255]);
        }
    }

    #[test]
    fn opaque_paint_hides_background() {
        let mut raster = Raster::new(3, 3).unwrap();
        raster.fill_circle(DVec2::new(1.5, 1.5), 2.0, Rgba::CYAN);
        let buf = to_rgba8(&raster, Rgba::rgb(255, 255, 255));
        assert_eq!(&buf[16..20], [0, 212, 255, 255]);
    }

    #[test]
    fn half_alpha_mixes_with_background() {
        let mut raster = Raster::new(3, 3).unwrap();
        raster.fill_circle(DVec2::new(1.5, 1.5), 2.0, Rgba::rgb(255, 255, 255).with_alpha(0.5));
        let buf = to_rgba8(&raster, Rgba::rgb(0, 0, 0));
        assert_eq!(&buf[16..20], [128, 128, 128, 255]);
    }
}
