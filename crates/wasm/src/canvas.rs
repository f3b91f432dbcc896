use glam::DVec2;
use particle_field_core::surface::{RadialGradient, Rect, Surface};
use particle_field_core::Rgba;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] over a canvas element's 2D context.
///
/// Drawing calls that the browser rejects are dropped; a frame with a bad
/// primitive still renders the rest.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `None` when the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Resizes the backing store. The browser clears the canvas as a side
    /// effect.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_radial_gradient(&mut self, rect: Rect, gradient: &RadialGradient) {
        let c = gradient.center;
        let Ok(fill) = self.ctx.create_radial_gradient(
            c.x,
            c.y,
            gradient.inner_radius,
            c.x,
            c.y,
            gradient.outer_radius,
        ) else {
            return;
        };
        for stop in &gradient.stops {
            if fill
                .add_color_stop(stop.offset as f32, &stop.color.to_css())
                .is_err()
            {
                log::warn!("rejected gradient stop at {}", stop.offset);
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&fill);
        self.ctx
            .fill_rect(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }
}
