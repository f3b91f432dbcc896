//! The drawing-surface abstraction engines paint onto.
//!
//! [`Surface`] covers exactly the 2D-canvas primitives the particle field
//! needs: clear, gradient-filled rectangle, filled circle and stroked line.
//! The browser host implements it over `CanvasRenderingContext2d`, the raster
//! crate over a CPU pixel buffer, and [`RecordingSurface`] captures the calls
//! for tests and statistics.

use crate::color::Rgba;
use glam::DVec2;

/// Largest surface a headless render will allocate (8192 x 8192).
pub const MAX_SURFACE_PIXELS: u64 = 8192 * 8192;

/// Whether `width` x `height` is non-empty and within [`MAX_SURFACE_PIXELS`].
pub fn dimensions_allowed(width: u32, height: u32) -> bool {
    width > 0 && height > 0 && width as u64 * height as u64 <= MAX_SURFACE_PIXELS
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        let max = self.origin + self.size;
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }
}

/// A color stop: `offset` in [0, 1] along the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Concentric radial gradient (both circles share `center`).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Color at distance `dist` from the center.
    ///
    /// Inside `inner_radius` the first stop applies, beyond `outer_radius` the
    /// last. Between stops channels and alpha interpolate linearly. A
    /// gradient without stops is transparent everywhere.
    pub fn sample(&self, dist: f64) -> Rgba {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Rgba::TRANSPARENT,
        };
        let span = self.outer_radius - self.inner_radius;
        let t = if span <= 0.0 {
            if dist < self.inner_radius {
                0.0
            } else {
                1.0
            }
        } else {
            ((dist - self.inner_radius) / span).clamp(0.0, 1.0)
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let w = b.offset - a.offset;
                let f = if w <= 0.0 { 1.0 } else { (t - a.offset) / w };
                return lerp(a.color, b.color, f);
            }
        }
        last.color
    }
}

fn lerp(a: Rgba, b: Rgba, t: f64) -> Rgba {
    let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    Rgba {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
        a: a.a + (b.a - a.a) * t,
    }
}

/// A 2D drawing target with canvas-like primitives.
///
/// Drawing is infallible: a surface that cannot render a primitive skips it.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    /// Fills `rect` with `gradient`, composited over existing content.
    fn fill_radial_gradient(&mut self, rect: Rect, gradient: &RadialGradient);

    /// Fills a full circle.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Strokes a straight segment.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Gradient {
        rect: Rect,
        gradient: RadialGradient,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Rgba,
    },
}

/// A surface that records draw calls instead of producing pixels.
///
/// [`Surface::clear`] is recorded like any other call and also drops the
/// commands before it, so after a frame the log holds exactly that frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Resizes the surface, like setting a canvas element's width/height.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Commands recorded since the last clear, including that clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_radial_gradient(&mut self, rect: Rect, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::Gradient {
            rect,
            gradient: gradient.clone(),
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glow() -> RadialGradient {
        RadialGradient {
            center: DVec2::new(50.0, 0.0),
            inner_radius: 0.0,
            outer_radius: 100.0,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: Rgba::CYAN.with_alpha(0.04),
                },
                ColorStop {
                    offset: 1.0,
                    color: Rgba::TRANSPARENT,
                },
            ],
        }
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(DVec2::new(0.0, 0.0)));
        assert!(r.contains(DVec2::new(9.99, 4.99)));
        assert!(!r.contains(DVec2::new(10.0, 2.0)));
        assert!(!r.contains(DVec2::new(2.0, -0.1)));
    }

    #[test]
    fn gradient_sample_hits_stops_at_ends() {
        let g = glow();
        assert_eq!(g.sample(0.0), Rgba::CYAN.with_alpha(0.04));
        assert_eq!(g.sample(100.0), Rgba::TRANSPARENT);
        assert_eq!(g.sample(500.0), Rgba::TRANSPARENT);
    }

    #[test]
    fn gradient_sample_interpolates_alpha() {
        let mid = glow().sample(50.0);
        assert!((mid.a - 0.02).abs() < 1e-12, "alpha at midpoint: {}", mid.a);
    }

    #[test]
    fn gradient_without_stops_is_transparent() {
        let g = RadialGradient {
            stops: Vec::new(),
            ..glow()
        };
        assert_eq!(g.sample(10.0), Rgba::TRANSPARENT);
    }

    #[test]
    fn degenerate_gradient_splits_at_inner_radius() {
        let g = RadialGradient {
            inner_radius: 10.0,
            outer_radius: 10.0,
            ..glow()
        };
        assert_eq!(g.sample(5.0), Rgba::CYAN.with_alpha(0.04));
        assert_eq!(g.sample(15.0), Rgba::TRANSPARENT);
    }

    #[test]
    fn recording_surface_clear_starts_a_new_frame() {
        let mut s = RecordingSurface::new(8, 8);
        s.fill_circle(DVec2::ZERO, 1.0, Rgba::CYAN);
        s.clear();
        s.stroke_line(DVec2::ZERO, DVec2::ONE, 0.5, Rgba::CYAN);
        assert_eq!(s.commands().len(), 2);
        assert_eq!(s.commands()[0], DrawCommand::Clear);
        assert_eq!(s.circles().count(), 0);
        assert_eq!(s.lines().count(), 1);
    }

    #[test]
    fn recording_surface_reports_size() {
        let mut s = RecordingSurface::new(640, 480);
        assert_eq!((s.width(), s.height()), (640, 480));
        s.set_size(320, 200);
        assert_eq!((s.width(), s.height()), (320, 200));
    }
}
