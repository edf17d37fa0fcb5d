//! Error types for comment-overlay.
//!
//! The layout passes themselves never fail: a missing anchor, an invalid token
//! or a non-finite measurement degrades to "skip this element" or "use the
//! fallback". Errors only exist at the edges, where a host loads a document
//! snapshot, reads configuration, or sets up logging.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error for the command-line host
//!   - [`SnapshotError`] - reading or validating a document snapshot
//!   - [`ConfigError`] - reading the TOML configuration
//!   - [`LoggingError`] - installing the tracing subscriber
//!   - `std::io::Error` / `serde_json::Error` - writing the report

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by the command-line host.
///
/// Domain-specific errors convert via `From`, so `?` composes throughout
/// `main`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The document snapshot could not be loaded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the report failed.
    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised while loading a document snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("Failed to read snapshot at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON or does not match the schema.
    #[error("Invalid snapshot JSON: {reason}")]
    Parse {
        /// Parser message, including line and column.
        reason: String,
    },

    /// An element violates a structural rule.
    #[error("Invalid element {index}: {reason}")]
    InvalidElement {
        /// Position of the element in the snapshot's element list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// The viewport has a non-finite or negative dimension.
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    /// The root font size is not a positive finite number.
    #[error("Invalid root font size: {0}")]
    InvalidFontSize(f64),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Parse {
            reason: err.to_string(),
        }
    }
}
