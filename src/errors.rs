/*!
 * Error types for the sub-sync application.
 *
 * This module contains custom error types for the scanning, synchronization and
 * filesystem parts of the application, using the thiserror crate for ergonomic
 * error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while walking a root directory
#[derive(Error, Debug)]
pub enum ScanError {
    /// The root passed on the command line is missing or not a directory
    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// An entry could not be read (permission denied, broken link, loop)
    #[error("Failed to read {path:?}: {message}")]
    Walk {
        /// Path that failed, when walkdir knows it
        path: Option<PathBuf>,
        /// Underlying walkdir message
        message: String,
    },
}

impl From<walkdir::Error> for ScanError {
    fn from(error: walkdir::Error) -> Self {
        Self::Walk {
            path: error.path().map(|p| p.to_path_buf()),
            message: error.to_string(),
        }
    }
}

/// Errors from running the external synchronizer
#[derive(Error, Debug)]
pub enum SyncError {
    /// The process could not be started at all
    #[error("CMD: {command} failed to start: {source}")]
    Launch {
        /// Command line that was attempted
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully
    #[error("CMD: {command} run failed, exit: {}", exit_label(.code))]
    ExitStatus {
        /// Command line that was run
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Filesystem operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Copy,
    Move,
    Remove,
    Read,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Copy => "copy",
            Self::Move => "move",
            Self::Remove => "remove",
            Self::Read => "read",
        };
        write!(f, "{}", name)
    }
}

/// A copy, move, remove or read that failed on disk
#[derive(Error, Debug)]
#[error("Failed to {operation} {path:?}: {source}")]
pub struct FileError {
    pub operation: FileOperation,
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl FileError {
    pub fn new(operation: FileOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Error while scanning
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Error from the synchronizer
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Config(error.to_string())
    }
}
