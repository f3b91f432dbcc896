#![deny(unsafe_code)]
//! CPU software rendering for particle-field.
//!
//! [`Raster`] implements [`Surface`] over a premultiplied RGBA buffer so the
//! CLI can render frames without a browser. Compositing is source-over, as
//! on a 2D canvas. Circles and lines are anti-aliased by a one-pixel coverage
//! ramp; lines thinner than a pixel are drawn at a coverage equal to their
//! width.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use glam::DVec2;
use particle_field_core::error::EngineError;
use particle_field_core::surface::{
    dimensions_allowed, RadialGradient, Rect, Surface, MAX_SURFACE_PIXELS,
};
use particle_field_core::Rgba;

/// Premultiplied RGBA pixel buffer, row-major, channels in [0, 1].
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<[f64; 4]>,
}

impl Raster {
    /// Transparent raster.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or the pixel count exceeds [`MAX_SURFACE_PIXELS`].
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if !dimensions_allowed(width, height) {
            return Err(EngineError::InvalidDimensions);
        }
        Ok(Self {
            width,
            height,
            data: vec![[0.0; 4]; width as usize * height as usize],
        })
    }

    /// Premultiplied pixel at (x, y), or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f64; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// All pixels, row-major.
    pub fn data(&self) -> &[[f64; 4]] {
        &self.data
    }

    /// Source-over of `color` at `coverage` onto pixel `idx`.
    fn blend(&mut self, idx: usize, color: Rgba, coverage: f64) {
        let [r, g, b, a] = color.to_unit();
        let sa = a * coverage;
        if sa <= 0.0 {
            return;
        }
        let dst = &mut self.data[idx];
        let keep = 1.0 - sa;
        dst[0] = r * sa + dst[0] * keep;
        dst[1] = g * sa + dst[1] * keep;
        dst[2] = b * sa + dst[2] * keep;
        dst[3] = sa + dst[3] * keep;
    }

    /// Pixel index range covering [min, max] on both axes, clipped.
    fn pixel_span(&self, min: DVec2, max: DVec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f64);
        let y1 = max.y.ceil().min(self.height as f64);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn for_each_pixel(
        &mut self,
        min: DVec2,
        max: DVec2,
        mut shade: impl FnMut(DVec2) -> Option<(Rgba, f64)>,
    ) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some((color, coverage)) = shade(center) {
                    let idx = y as usize * self.width as usize + x as usize;
                    self.blend(idx, color, coverage);
                }
            }
        }
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for Raster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.data.fill([0.0; 4]);
    }

    fn fill_radial_gradient(&mut self, rect: Rect, gradient: &RadialGradient) {
        let max = rect.origin + rect.size;
        self.for_each_pixel(rect.origin, max, |p| {
            rect.contains(p)
                .then(|| (gradient.sample(p.distance(gradient.center)), 1.0))
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let reach = DVec2::splat(radius + 1.0);
        self.for_each_pixel(center - reach, center + reach, |p| {
            let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
            (coverage > 0.0).then_some((color, coverage))
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        if width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let reach = DVec2::splat(half + 1.0);
        let cap = width.min(1.0);
        self.for_each_pixel(from.min(to) - reach, from.max(to) + reach, |p| {
            let d = distance_to_segment(p, from, to);
            let coverage = (half + 0.5 - d).clamp(0.0, cap);
            (coverage > 0.0).then_some((color, coverage))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field_core::surface::ColorStop;
    use proptest::prelude::*;

    fn opaque_red() -> Rgba {
        Rgba::rgb(255, 0, 0)
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            Raster::new(0, 10),
            Err(EngineError::InvalidDimensions)
        ));
        assert!(Raster::new(10, 0).is_err());
    }

    #[test]
    fn new_rejects_oversized_dimensions() {
        assert!(matches!(
            Raster::new(100_000, 100_000),
            Err(EngineError::InvalidDimensions)
        ));
        assert!(Raster::new(u32::MAX, 2).is_err());
    }

    #[test]
    fn new_raster_is_transparent() {
        let r = Raster::new(4, 3).unwrap();
        assert_eq!(r.data().len(), 12);
        assert!(r.data().iter().all(|px| *px == [0.0; 4]));
        assert!(r.pixel(4, 0).is_none());
    }

    #[test]
    fn circle_fills_center_not_corners() {
        let mut r = Raster::new(20, 20).unwrap();
        r.fill_circle(DVec2::new(10.0, 10.0), 3.0, opaque_red());
        let center = r.pixel(10, 10).unwrap();
        assert!((center[3] - 1.0).abs() < 1e-12);
        assert!((center[0] - 1.0).abs() < 1e-12);
        assert_eq!(r.pixel(0, 0).unwrap(), [0.0; 4]);
        assert_eq!(r.pixel(19, 19).unwrap(), [0.0; 4]);
    }

    #[test]
    fn circle_alpha_is_premultiplied() {
        let mut r = Raster::new(10, 10).unwrap();
        r.fill_circle(DVec2::new(5.0, 5.0), 2.0, Rgba::CYAN.with_alpha(0.5));
        let [red, g, b, a] = r.pixel(5, 5).unwrap();
        assert!((a - 0.5).abs() < 1e-12);
        assert!(red.abs() < 1e-12);
        assert!((g - 212.0 / 255.0 * 0.5).abs() < 1e-12);
        assert!((b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn source_over_accumulates_alpha() {
        let mut r = Raster::new(4, 4).unwrap();
        let half = Rgba::CYAN.with_alpha(0.5);
        r.fill_circle(DVec2::new(2.0, 2.0), 3.0, half);
        r.fill_circle(DVec2::new(2.0, 2.0), 3.0, half);
        let a = r.pixel(1, 1).unwrap()[3];
        assert!((a - 0.75).abs() < 1e-12, "alpha after two 50% layers: {a}");
    }

    #[test]
    fn thin_line_draws_at_partial_coverage() {
        let mut r = Raster::new(20, 5).unwrap();
        r.stroke_line(
            DVec2::new(0.0, 2.5),
            DVec2::new(20.0, 2.5),
            0.5,
            opaque_red(),
        );
        let on = r.pixel(10, 2).unwrap()[3];
        assert!((on - 0.5).abs() < 1e-12, "on-line coverage {on}");
        assert_eq!(r.pixel(10, 0).unwrap()[3], 0.0);
    }

    #[test]
    fn degenerate_line_is_a_dot() {
        let mut r = Raster::new(5, 5).unwrap();
        let p = DVec2::new(2.5, 2.5);
        r.stroke_line(p, p, 1.0, opaque_red());
        assert!(r.pixel(2, 2).unwrap()[3] > 0.0);
        assert_eq!(r.pixel(0, 0).unwrap()[3], 0.0);
    }

    #[test]
    fn off_surface_shapes_are_clipped() {
        let mut r = Raster::new(8, 8).unwrap();
        r.fill_circle(DVec2::new(-50.0, -50.0), 2.0, opaque_red());
        r.stroke_line(
            DVec2::new(100.0, 100.0),
            DVec2::new(200.0, 100.0),
            0.5,
            opaque_red(),
        );
        assert!(r.data().iter().all(|px| px[3] == 0.0));
    }

    #[test]
    fn gradient_fades_from_center() {
        let mut r = Raster::new(100, 100).unwrap();
        let gradient = RadialGradient {
            center: DVec2::new(50.0, 0.0),
            inner_radius: 0.0,
            outer_radius: 65.0,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: Rgba::CYAN.with_alpha(0.04),
                },
                ColorStop {
                    offset: 1.0,
                    color: Rgba::CYAN.with_alpha(0.0),
                },
            ],
        };
        r.fill_radial_gradient(Rect::new(0.0, 0.0, 100.0, 100.0), &gradient);
        let near = r.pixel(50, 0).unwrap()[3];
        let far = r.pixel(50, 99).unwrap()[3];
        assert!(near > 0.03 && near <= 0.04, "near alpha {near}");
        assert_eq!(far, 0.0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut r = Raster::new(6, 6).unwrap();
        r.fill_circle(DVec2::new(3.0, 3.0), 2.0, opaque_red());
        r.clear();
        assert!(r.data().iter().all(|px| *px == [0.0; 4]));
    }

    #[test]
    fn segment_distance() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(10.0, 0.0);
        assert!((distance_to_segment(DVec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((distance_to_segment(DVec2::new(-4.0, 3.0), a, b) - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn compositing_stays_in_unit_range(
            shapes in proptest::collection::vec(
                (0.0..32.0f64, 0.0..32.0f64, 0.0..32.0f64, 0.0..32.0f64, 0.0..3.0f64, 0.0..=1.0f64),
                1..20,
            ),
        ) {
            let mut r = Raster::new(32, 32).unwrap();
            for (x0, y0, x1, y1, size, alpha) in shapes {
                let color = Rgba::CYAN.with_alpha(alpha);
                r.fill_circle(DVec2::new(x0, y0), size, color);
                r.stroke_line(DVec2::new(x0, y0), DVec2::new(x1, y1), size, color);
            }
            for px in r.data() {
                prop_assert!((0.0..=1.0 + 1e-12).contains(&px[3]));
                for c in &px[..3] {
                    prop_assert!(*c >= 0.0 && *c <= px[3] + 1e-12);
                }
            }
        }
    }
}
