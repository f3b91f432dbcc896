//! Reproducible description of a headless render.
//!
//! A [`Scene`] fixes everything a live browser session leaves to chance:
//! surface size, preset and overrides, PRNG seed, how many frames to run, and
//! an optional fixed pointer position.

use crate::error::EngineError;
use crate::surface::dimensions_allowed;
use serde::{Deserialize, Serialize};

fn default_preset() -> String {
    "classic".to_owned()
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Serializable render description. Same scene, same binary, same pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
    /// Pointer position held for the whole render; `None` leaves the
    /// off-surface sentinel in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<[f64; 2]>,
}

impl Scene {
    /// Scene with the default preset, no overrides, zero frames and no pointer.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            preset: default_preset(),
            params: empty_params(),
            seed,
            frames: 0,
            pointer: None,
        }
    }

    /// Upper bound on `frames` for a headless run.
    pub const MAX_FRAMES: usize = 1_000_000;

    /// Rejects empty or oversized surfaces and frame counts above
    /// [`MAX_FRAMES`](Self::MAX_FRAMES).
    pub fn validate(&self) -> Result<(), EngineError> {
        if !dimensions_allowed(self.width, self.height) {
            return Err(EngineError::InvalidDimensions);
        }
        if self.frames > Self::MAX_FRAMES {
            return Err(EngineError::TooManyFrames(self.frames));
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
