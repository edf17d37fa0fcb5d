//! Tracing subscriber initialization.
//!
//! The command-line host writes its JSON report to stdout, so diagnostics go
//! to a log file instead. Follow them with `tail -f` while experimenting.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Why the log file could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Cannot create log directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was being created.
        path: PathBuf,
        /// I/O failure behind it.
        #[source]
        source: std::io::Error,
    },

    /// The path names no file to append to.
    #[error("Log path {0:?} does not name a file")]
    InvalidPath(PathBuf),

    /// Another global subscriber won the race.
    #[error("A tracing subscriber is already installed")]
    SubscriberAlreadySet,
}

/// Split a log path into the directory to create and the file name to
/// append to.
///
/// A bare file name logs into the current directory.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidPath`] if the path has no UTF-8 file name,
/// which includes a filesystem root and paths ending in `..`.
pub fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let Some(file_name) = log_path.file_name().and_then(|n| n.to_str()) else {
        return Err(LoggingError::InvalidPath(log_path.to_path_buf()));
    };

    let directory = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    Ok((directory, file_name))
}

/// Install a global subscriber that appends to `log_path`.
///
/// The filter comes from `RUST_LOG`, or [`DEFAULT_FILTER`] when that is unset
/// or unparsable. Missing directories are created first.
///
/// # Errors
///
/// Returns an error if the path is unusable, the directory cannot be
/// created, or a global subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(tracing_appender::rolling::never(directory, file_name))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
