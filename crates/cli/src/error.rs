//! CLI errors and their exit codes.
//!
//! - 0:  success
//! - 2:  clap argument error (raised before our code runs)
//! - 10: engine error (unknown preset, bad dimensions, too many frames, bad colour)
//! - 11: I/O error (scene file read, PNG write)
//! - 12: input error (malformed `--params`, `--pointer` or scene JSON)
//! - 13: serialization error

use particle_field_core::EngineError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// An engine-level error (unknown preset, bad dimensions, bad colour).
    Engine(EngineError),
    /// Reading a scene file or writing the PNG failed.
    Io(String),
    /// Malformed user input (`--params`, `--pointer`, scene JSON).
    Input(String),
    /// JSON output could not be produced.
    Serialization(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
