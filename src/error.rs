//! Error type shared by the engine, configuration, and CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = IdError> = std::result::Result<T, E>;

/// Everything that can go wrong while building or using a generator.
///
/// Per-call conditions (sequence exhaustion, clock regression) are handled
/// inside the generators and never surface here.
#[derive(Error, Debug)]
pub enum IdError {
    /// Node identity could not be determined, or a configured value is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The clock cannot be expressed as a delta from the generator epoch.
    #[error("clock reading {now_ms} ms is outside the encodable id range")]
    ClockOutOfRange {
        /// The offending clock reading.
        now_ms: i64,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`crate::config::IdConfig`].
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_yaml::Error,
    },

    /// A textual id could not be turned into a [`crate::id::GeneratedId`].
    #[error("invalid id {input:?}: {reason}")]
    InvalidId {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Command output could not be encoded.
    #[error("failed to encode output: {0}")]
    Serialization(#[from] serde_json::Error),
}
