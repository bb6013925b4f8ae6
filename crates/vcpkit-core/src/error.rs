//! Error handling for VCPKit
//!
//! Provides the error types shared by every layer of the application:
//! - Command errors (requests the motion controller refused or could not run)
//! - A unified [`Error`] used in public APIs
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Command error type
///
/// Represents a machine command that was rejected before or while it was
/// forwarded to the motion controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The axis letter is not one of the known machine axes
    #[error("Unknown axis letter: {letter:?}")]
    UnknownAxis {
        /// The offending letter.
        letter: char,
    },

    /// The axis exists but is not part of this machine's configuration
    #[error("Axis {axis} is not configured on this machine")]
    AxisNotConfigured {
        /// The axis letter.
        axis: String,
    },

    /// The machine state does not allow the command right now
    #[error("Machine not ready for {command}: {reason}")]
    NotReady {
        /// Name of the refused command.
        command: String,
        /// Why the machine refused it.
        reason: String,
    },

    /// Program path is empty or unusable
    #[error("Invalid program path: {path:?}")]
    InvalidProgram {
        /// The path that was requested.
        path: String,
    },

    /// Generic command rejection
    #[error("Command rejected: {reason}")]
    Rejected {
        /// The reason the command was rejected.
        reason: String,
    },
}

impl CommandError {
    /// Shorthand for a [`CommandError::NotReady`]
    pub fn not_ready(command: impl Into<String>, reason: impl Into<String>) -> Self {
        CommandError::NotReady {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for VCPKit
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a command error
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Command(_))
    }

    /// Check if the machine refused the command because of its current state
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Error::Command(CommandError::NotReady { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
