//! Lenient extraction of typed engine parameters from a JSON object.
//!
//! Parameter overrides arrive as loose JSON (CLI `--params`, scene files,
//! JavaScript objects). Every helper takes the override object, a key and the
//! value to keep when the key is absent or unusable, so a bad override never
//! fails a render; it just leaves the preset value in place.

use crate::color::Rgba;
use serde_json::Value;

/// Reads a number, accepting JSON integers as well as floats.
///
/// Non-finite results cannot come out of JSON, so the returned value is
/// always either the override or `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a non-negative integer that fits in `u32`.
///
/// Floats, negatives and out-of-range values keep `default`.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads a JSON boolean; anything else keeps `default`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Reads a `"#rrggbb"` color. The override's alpha is always 1.0; alpha is
/// applied per draw call.
pub fn param_color(params: &Value, name: &str, default: Rgba) -> Rgba {
    params
        .get(name)
        .and_then(Value::as_str)
        .and_then(|hex| Rgba::from_hex(hex).ok())
        .unwrap_or(default)
}
