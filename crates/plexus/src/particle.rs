//! A single drifting dot and the per-frame rules that move it.

use crate::params::PlexusParams;
use glam::DVec2;
use particle_field_core::Xorshift64;

/// One point of the field.
///
/// `radius` and `alpha` are fixed at creation. `velocity` is never changed
/// by the simulation; pointer repulsion nudges `position` directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub alpha: f64,
}

impl Particle {
    /// Scatters a particle uniformly over a `width` x `height` surface.
    pub fn random(rng: &mut Xorshift64, width: f64, height: f64, params: &PlexusParams) -> Self {
        let position = rng.point_in(width, height);
        let velocity = rng.symmetric_vec2(params.max_speed);
        let radius = rng.range(params.radius_min, params.radius_max);
        let alpha = rng.range(params.alpha_min, params.alpha_max);
        Self {
            position,
            velocity,
            radius,
            alpha,
        }
    }

    /// Moves one frame's worth of velocity.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Toroidal wrap with a margin: a dot leaving more than `margin` past
    /// one edge reappears `margin` outside the opposite edge.
    pub fn wrap(&mut self, width: f64, height: f64, margin: f64) {
        self.position.x = wrap_axis(self.position.x, width, margin);
        self.position.y = wrap_axis(self.position.y, height, margin);
    }

    /// Pushes the particle away from `pointer` when strictly within `radius`.
    ///
    /// The displacement is `(radius - d) / radius * strength` along the unit
    /// vector from the pointer, applied to this frame's position only.
    /// Returns the displacement (zero when out of range or exactly on the
    /// pointer, where the direction is undefined).
    pub fn repel(&mut self, pointer: DVec2, radius: f64, strength: f64) -> DVec2 {
        let away = self.position - pointer;
        let d = away.length();
        if !(d > 0.0 && d < radius) {
            return DVec2::ZERO;
        }
        let push = away / d * ((radius - d) / radius * strength);
        self.position += push;
        push
    }
}

fn wrap_axis(v: f64, extent: f64, margin: f64) -> f64 {
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}
