use glam::DVec2;

/// Where the pointer sits before any move event: far enough off-surface
/// that no particle is within repulsion range.
pub const POINTER_SENTINEL: DVec2 = DVec2::new(-9999.0, -9999.0);

/// Last reported pointer position. Last write wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: DVec2,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: POINTER_SENTINEL,
        }
    }
}

impl PointerState {
    pub fn moved_to(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
    }
}
