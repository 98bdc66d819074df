//! Fatal startup and session errors.
//!
//! Anything in here aborts the run: there is no partial recovery once a
//! resource needed by the session cannot be allocated.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a debugging session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Configuration could not be loaded or resolved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// stdin is not attached to a terminal
    #[error("Not a terminal")]
    NotATerminal,

    /// One of the protocol patterns failed to compile
    #[error("Failed to compile output pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Allocating the pseudo-terminal failed
    #[error("Failed to open pseudo-terminal: {0}")]
    PtyOpen(String),

    /// The debugger could not be started on the pty
    #[error("Failed to start debugger '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// Creating the editor pipe failed
    #[error("Failed to create editor pipe at '{path}': {source}")]
    Pipe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The current working directory is unavailable
    #[error("Failed to read current directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    /// Any other I/O failure during setup
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    pub(crate) fn pty(err: impl std::fmt::Display) -> Self {
        SessionError::PtyOpen(err.to_string())
    }

    pub(crate) fn spawn(program: &str, err: impl std::fmt::Display) -> Self {
        SessionError::Spawn {
            program: program.to_string(),
            reason: err.to_string(),
        }
    }
}
