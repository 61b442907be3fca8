//! Error types for the tournament clock
//!
//! Only [`ConfigurationError`] is ever shown to the operator. Persistence and
//! audio failures are absorbed by the component that owns the resource.

use std::path::PathBuf;

use thiserror::Error;

/// The blind-level structure cannot drive a session.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no valid levels configured: the level sequence is empty")]
    EmptySequence,
    #[error("no valid levels configured: level {level} has an invalid duration ({minutes} minutes)")]
    InvalidDuration { level: usize, minutes: f64 },
    #[error("failed to read levels from {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse levels from {path}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigurationError {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigurationError::Unreadable {
            path: path.into().display().to_string(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ConfigurationError::Malformed {
            path: path.into().display().to_string(),
            source,
        }
    }
}

/// Key-value store failures, never surfaced beyond the persistence adapter.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("state store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("state store is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Tone playback failures, never surfaced beyond the cue path.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("failed to spawn tone player: {0}")]
    Spawn(#[from] std::io::Error),
}
