//! The `Engine` trait every animated background implements, and the host
//! events that drive it.
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Engine>`.

use crate::surface::Surface;
use serde_json::Value;

/// Something the host environment reports between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The viewport (and with it the drawing surface) changed size.
    Resize { width: u32, height: u32 },
    /// The pointer moved to absolute surface coordinates.
    PointerMove { x: f64, y: f64 },
}

/// A frame-driven visual simulation.
///
/// Hosts call [`Engine::handle`] for each event as it arrives and
/// [`Engine::frame`] once per display refresh. Neither can fail: the effect
/// is best-effort and degrades by drawing less, never by erroring.
pub trait Engine {
    /// Applies one host event.
    fn handle(&mut self, event: HostEvent);

    /// Advances the simulation one tick and paints it onto `surface`.
    fn frame(&mut self, surface: &mut dyn Surface);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing every parameter: type, range, default, description.
    fn param_schema(&self) -> Value;
}
