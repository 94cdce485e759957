//! Error types for encounter configuration.

use thiserror::Error;

/// Fatal errors raised while loading or validating an encounter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncounterError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// No waves, or a wave with nothing to spawn.
    #[error("Encounter has nothing to run: {0}")]
    EmptyConfiguration(String),

    /// Hostiles would have nowhere to appear.
    #[error("Encounter defines no spawn points")]
    NoSpawnPoints,

    /// A duration that must be positive is not.
    #[error("Invalid timing '{field}': {value}")]
    InvalidTiming { field: &'static str, value: f32 },
}
