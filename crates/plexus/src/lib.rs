#![deny(unsafe_code)]
//! Pointer-reactive particle field ("plexus") background.
//!
//! A sparse set of slowly drifting dots covers the surface, one per
//! `area_per_particle` px². Each frame every dot moves by its velocity, wraps
//! toroidally past a small margin, is nudged away from the pointer when close,
//! and is painted; every pair of dots closer than `link_distance` is joined by
//! a faint line whose opacity falls off linearly with distance. A soft radial
//! glow from the top centre sits behind everything.
//!
//! Pairs are checked once per frame in sequence order, after the earlier dot
//! of the pair has moved and before the later one has. Linking is O(n²),
//! which stays cheap at the sparse default density.

pub mod params;
pub mod particle;
pub mod pointer;

pub use params::{PlexusParams, PRESET_NAMES};
pub use particle::Particle;
pub use pointer::{PointerState, POINTER_SENTINEL};

use glam::DVec2;
use particle_field_core::error::EngineError;
use particle_field_core::surface::{ColorStop, RadialGradient, Rect, Surface};
use particle_field_core::{Engine, HostEvent, Xorshift64};
use serde_json::Value;

/// Opacity of a link between two dots `distance` apart.
///
/// `base` at zero distance, falling linearly to 0 at `link_distance`.
pub fn link_alpha(distance: f64, link_distance: f64, base: f64) -> f64 {
    base * (1.0 - distance / link_distance)
}

/// The particle field simulator.
///
/// Owns its surface dimensions, particles, pointer state and PRNG. The
/// particle set is regenerated from scratch on every [`resize`](Self::resize);
/// the pointer state survives resizes.
pub struct ParticleField {
    width: u32,
    height: u32,
    params: PlexusParams,
    particles: Vec<Particle>,
    pointer: PointerState,
    rng: Xorshift64,
    last_link_count: usize,
}

impl ParticleField {
    /// Creates a field sized `width` x `height` and scatters its particles.
    ///
    /// Zero dimensions are accepted and simply produce an empty field.
    pub fn new(width: u32, height: u32, seed: u64, params: PlexusParams) -> Self {
        let mut field = Self {
            width,
            height,
            params,
            particles: Vec::new(),
            pointer: PointerState::default(),
            rng: Xorshift64::new(seed),
            last_link_count: 0,
        };
        field.regenerate();
        field
    }

    /// Creates a field from a preset name plus JSON overrides.
    ///
    /// Returns `EngineError::UnknownPreset` for an unrecognized preset.
    pub fn from_json(
        width: u32,
        height: u32,
        seed: u64,
        preset: &str,
        overrides: &Value,
    ) -> Result<Self, EngineError> {
        Ok(Self::new(
            width,
            height,
            seed,
            PlexusParams::from_json(preset, overrides)?,
        ))
    }

    /// Creates a field with an explicit particle set instead of a random one.
    ///
    /// A later [`resize`](Self::resize) still regenerates randomly.
    pub fn with_particles(
        width: u32,
        height: u32,
        params: PlexusParams,
        particles: Vec<Particle>,
    ) -> Self {
        Self {
            width,
            height,
            params,
            particles,
            pointer: PointerState::default(),
            rng: Xorshift64::new(0),
            last_link_count: 0,
        }
    }

    /// Adopts new surface dimensions and regenerates every particle.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    /// Records the pointer's new position; it takes effect on the next frame.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.moved_to(x, y);
    }

    /// Surface width the particles were generated for.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height the particles were generated for.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Particles in draw order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Last known pointer position, or the sentinel before any move.
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// The resolved preset plus overrides in effect.
    pub fn plexus_params(&self) -> &PlexusParams {
        &self.params
    }

    /// Links drawn by the most recent frame.
    pub fn last_link_count(&self) -> usize {
        self.last_link_count
    }

    fn regenerate(&mut self) {
        let count = self.params.particle_count(self.width, self.height);
        let (w, h) = (self.width as f64, self.height as f64);
        let params = self.params;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle::random(rng, w, h, &params))
            .collect();
        log::debug!(
            "regenerated {count} particles for {}x{} surface",
            self.width,
            self.height
        );
    }

    fn glow_gradient(&self) -> RadialGradient {
        let (w, h) = (self.width as f64, self.height as f64);
        let color = self.params.color;
        RadialGradient {
            center: DVec2::new(w / 2.0, 0.0),
            inner_radius: 0.0,
            outer_radius: h * self.params.glow_extent,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: color.with_alpha(self.params.glow_alpha),
                },
                ColorStop {
                    offset: 1.0,
                    color: color.with_alpha(0.0),
                },
            ],
        }
    }
}

impl Engine for ParticleField {
    fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resize { width, height } => self.resize(width, height),
            HostEvent::PointerMove { x, y } => self.pointer_moved(x, y),
        }
    }

    fn frame(&mut self, surface: &mut dyn Surface) {
        let p = self.params;
        let (w, h) = (self.width as f64, self.height as f64);
        let pointer = self.pointer.position;

        surface.clear();
        if p.glow {
            surface.fill_radial_gradient(Rect::new(0.0, 0.0, w, h), &self.glow_gradient());
        }

        let mut links = 0;
        for i in 0..self.particles.len() {
            let (head, later) = self.particles.split_at_mut(i + 1);
            let dot = &mut head[i];

            dot.advance();
            dot.wrap(w, h, p.wrap_margin);
            dot.repel(pointer, p.repulsion_radius, p.repulsion_strength);
            surface.fill_circle(dot.position, dot.radius, p.color.with_alpha(dot.alpha));

            for other in later.iter() {
                let d = dot.position.distance(other.position);
                if d < p.link_distance {
                    let alpha = link_alpha(d, p.link_distance, p.link_alpha);
                    surface.stroke_line(
                        dot.position,
                        other.position,
                        p.link_width,
                        p.color.with_alpha(alpha),
                    );
                    links += 1;
                }
            }
        }
        self.last_link_count = links;
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        PlexusParams::schema()
    }
}
