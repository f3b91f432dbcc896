//! Colors as the 2D canvas sees them: 8-bit sRGB channels plus a real alpha.
//!
//! Particles, links and the glow all share one base hue and differ only in
//! alpha, so [`Rgba::with_alpha`] is the common way to derive a paint.

use crate::error::EngineError;

/// sRGB color with 8-bit channels and alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// The field's default hue, `#00d4ff`, fully opaque.
    pub const CYAN: Rgba = Rgba::rgb(0, 212, 255);

    /// Fully transparent black, the canvas `"transparent"` keyword.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive) as an opaque color.
    pub fn from_hex(hex: &str) -> Result<Rgba, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgba::rgb(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// `"#rrggbb"`; alpha is dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Same channels, alpha replaced and clamped to [0, 1].
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string for canvas `fillStyle` / `strokeStyle`,
    /// e.g. `rgba(0,212,255,0.04)`.
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Channels as floats in [0, 1], alpha last.
    pub fn to_unit(self) -> [f64; 4] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a,
        ]
    }
}
