//! Tunable constants of the particle field, with named presets.
//!
//! Two hand-tuned variants of the effect exist in the wild, differing only in
//! repulsion strength, the alpha ceiling and link opacity. Both are kept as
//! presets; `classic` is the default.

use particle_field_core::error::EngineError;
use particle_field_core::params::{param_bool, param_color, param_f64, param_u32};
use particle_field_core::Rgba;
use serde_json::{json, Value};

/// Surface area (px²) per particle: count = floor(W·H / area).
const DEFAULT_AREA_PER_PARTICLE: u32 = 18_000;
/// Velocity components are drawn from [-max_speed, max_speed].
const DEFAULT_MAX_SPEED: f64 = 0.18;
const DEFAULT_RADIUS_MIN: f64 = 0.8;
const DEFAULT_RADIUS_MAX: f64 = 2.2;
const DEFAULT_ALPHA_MIN: f64 = 0.15;
/// Distance past an edge before a particle re-enters from the opposite one.
const DEFAULT_WRAP_MARGIN: f64 = 5.0;
const DEFAULT_REPULSION_RADIUS: f64 = 90.0;
const DEFAULT_LINK_DISTANCE: f64 = 120.0;
const DEFAULT_LINK_WIDTH: f64 = 0.5;
const DEFAULT_GLOW_ALPHA: f64 = 0.04;
/// Glow outer radius as a fraction of surface height.
const DEFAULT_GLOW_EXTENT: f64 = 0.65;

/// Names accepted by [`PlexusParams::from_preset`].
pub const PRESET_NAMES: &[&str] = &["classic", "vivid"];

/// Every constant the simulation and its painting read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlexusParams {
    pub area_per_particle: u32,
    pub max_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub alpha_min: f64,
    pub alpha_max: f64,
    pub wrap_margin: f64,
    pub repulsion_radius: f64,
    /// Peak displacement per frame, reached as the pointer distance nears 0.
    pub repulsion_strength: f64,
    pub link_distance: f64,
    /// Link alpha at zero distance; fades linearly to 0 at `link_distance`.
    pub link_alpha: f64,
    pub link_width: f64,
    pub glow: bool,
    pub glow_alpha: f64,
    pub glow_extent: f64,
    pub color: Rgba,
}

impl Default for PlexusParams {
    fn default() -> Self {
        Self::classic()
    }
}

impl PlexusParams {
    /// The softer variant: gentler push, dimmer dots and links.
    pub fn classic() -> Self {
        Self {
            area_per_particle: DEFAULT_AREA_PER_PARTICLE,
            max_speed: DEFAULT_MAX_SPEED,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_max: DEFAULT_RADIUS_MAX,
            alpha_min: DEFAULT_ALPHA_MIN,
            alpha_max: 0.5,
            wrap_margin: DEFAULT_WRAP_MARGIN,
            repulsion_radius: DEFAULT_REPULSION_RADIUS,
            repulsion_strength: 0.35,
            link_distance: DEFAULT_LINK_DISTANCE,
            link_alpha: 0.055,
            link_width: DEFAULT_LINK_WIDTH,
            glow: true,
            glow_alpha: DEFAULT_GLOW_ALPHA,
            glow_extent: DEFAULT_GLOW_EXTENT,
            color: Rgba::CYAN,
        }
    }

    /// The brighter variant: stronger repulsion, higher dot and link alpha.
    pub fn vivid() -> Self {
        Self {
            alpha_max: 0.55,
            repulsion_strength: 0.4,
            link_alpha: 0.06,
            ..Self::classic()
        }
    }

    /// Looks up a preset by name.
    ///
    /// Returns `EngineError::UnknownPreset` for names outside [`PRESET_NAMES`].
    pub fn from_preset(name: &str) -> Result<Self, EngineError> {
        match name {
            "classic" => Ok(Self::classic()),
            "vivid" => Ok(Self::vivid()),
            _ => Err(EngineError::UnknownPreset(name.to_string())),
        }
    }

    /// Applies JSON overrides on top of `self`.
    ///
    /// Missing or mistyped keys keep their current value. An
    /// `area_per_particle` of 0 is raised to 1.
    pub fn with_overrides(self, params: &Value) -> Self {
        Self {
            area_per_particle: param_u32(params, "area_per_particle", self.area_per_particle)
                .max(1),
            max_speed: param_f64(params, "max_speed", self.max_speed),
            radius_min: param_f64(params, "radius_min", self.radius_min),
            radius_max: param_f64(params, "radius_max", self.radius_max),
            alpha_min: param_f64(params, "alpha_min", self.alpha_min),
            alpha_max: param_f64(params, "alpha_max", self.alpha_max),
            wrap_margin: param_f64(params, "wrap_margin", self.wrap_margin),
            repulsion_radius: param_f64(params, "repulsion_radius", self.repulsion_radius),
            repulsion_strength: param_f64(params, "repulsion_strength", self.repulsion_strength),
            link_distance: param_f64(params, "link_distance", self.link_distance),
            link_alpha: param_f64(params, "link_alpha", self.link_alpha),
            link_width: param_f64(params, "link_width", self.link_width),
            glow: param_bool(params, "glow", self.glow),
            glow_alpha: param_f64(params, "glow_alpha", self.glow_alpha),
            glow_extent: param_f64(params, "glow_extent", self.glow_extent),
            color: param_color(params, "color", self.color),
        }
    }

    /// Preset by name, then overrides.
    pub fn from_json(preset: &str, params: &Value) -> Result<Self, EngineError> {
        Ok(Self::from_preset(preset)?.with_overrides(params))
    }

    /// floor(width · height / area_per_particle), computed in integers.
    pub fn particle_count(&self, width: u32, height: u32) -> usize {
        let area = width as u64 * height as u64;
        (area / self.area_per_particle.max(1) as u64) as usize
    }

    /// Current values as a JSON object keyed like the overrides.
    pub fn to_json(&self) -> Value {
        json!({
            "area_per_particle": self.area_per_particle,
            "max_speed": self.max_speed,
            "radius_min": self.radius_min,
            "radius_max": self.radius_max,
            "alpha_min": self.alpha_min,
            "alpha_max": self.alpha_max,
            "wrap_margin": self.wrap_margin,
            "repulsion_radius": self.repulsion_radius,
            "repulsion_strength": self.repulsion_strength,
            "link_distance": self.link_distance,
            "link_alpha": self.link_alpha,
            "link_width": self.link_width,
            "glow": self.glow,
            "glow_alpha": self.glow_alpha,
            "glow_extent": self.glow_extent,
            "color": self.color.to_hex(),
        })
    }

    /// Type, default, range and description for every parameter.
    pub fn schema() -> Value {
        let d = Self::classic();
        json!({
            "area_per_particle": {
                "type": "integer",
                "default": d.area_per_particle,
                "min": 1,
                "max": 1_000_000,
                "description": "Surface area in px² per particle; count = floor(W·H / area)"
            },
            "max_speed": {
                "type": "number",
                "default": d.max_speed,
                "min": 0.0,
                "max": 5.0,
                "description": "Velocity components are drawn from [-max_speed, max_speed]"
            },
            "radius_min": {
                "type": "number",
                "default": d.radius_min,
                "min": 0.1,
                "max": 20.0,
                "description": "Smallest dot radius"
            },
            "radius_max": {
                "type": "number",
                "default": d.radius_max,
                "min": 0.1,
                "max": 20.0,
                "description": "Largest dot radius"
            },
            "alpha_min": {
                "type": "number",
                "default": d.alpha_min,
                "min": 0.0,
                "max": 1.0,
                "description": "Lowest dot opacity"
            },
            "alpha_max": {
                "type": "number",
                "default": d.alpha_max,
                "min": 0.0,
                "max": 1.0,
                "description": "Highest dot opacity (classic 0.5, vivid 0.55)"
            },
            "wrap_margin": {
                "type": "number",
                "default": d.wrap_margin,
                "min": 0.0,
                "max": 100.0,
                "description": "Distance past an edge before wrapping to the opposite edge"
            },
            "repulsion_radius": {
                "type": "number",
                "default": d.repulsion_radius,
                "min": 0.0,
                "max": 1000.0,
                "description": "Pointer distance below which dots are pushed away"
            },
            "repulsion_strength": {
                "type": "number",
                "default": d.repulsion_strength,
                "min": 0.0,
                "max": 10.0,
                "description": "Peak push per frame (classic 0.35, vivid 0.4)"
            },
            "link_distance": {
                "type": "number",
                "default": d.link_distance,
                "min": 0.0,
                "max": 1000.0,
                "description": "Dots closer than this are joined by a line"
            },
            "link_alpha": {
                "type": "number",
                "default": d.link_alpha,
                "min": 0.0,
                "max": 1.0,
                "description": "Line opacity at zero distance (classic 0.055, vivid 0.06)"
            },
            "link_width": {
                "type": "number",
                "default": d.link_width,
                "min": 0.1,
                "max": 10.0,
                "description": "Line width in px"
            },
            "glow": {
                "type": "boolean",
                "default": d.glow,
                "description": "Paint the radial backdrop glow from the top centre"
            },
            "glow_alpha": {
                "type": "number",
                "default": d.glow_alpha,
                "min": 0.0,
                "max": 1.0,
                "description": "Glow opacity at its centre"
            },
            "glow_extent": {
                "type": "number",
                "default": d.glow_extent,
                "min": 0.0,
                "max": 4.0,
                "description": "Glow radius as a fraction of surface height"
            },
            "color": {
                "type": "string",
                "default": d.color.to_hex(),
                "description": "Base hue of dots, links and glow as #rrggbb"
            }
        })
    }
}
