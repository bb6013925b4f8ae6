//! Error types for control discovery and binding.
//!
//! None of these are fatal to the window: the worst outcome of any of them is
//! a control that stays unbound.

use thiserror::Error;
use vcpkit_core::CommandError;

use crate::handlers::HandlerKey;

/// Outcome of parsing a control name that did not yield a handler key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The name does not start with the discovery prefix. Skipped silently.
    #[error("not a bindable control")]
    NotCandidate,

    /// The prefix matches but there is no handler segment.
    #[error("control name {name:?} has no handler segment")]
    Malformed {
        /// The declared control name.
        name: String,
    },
}

/// A handler refused the arguments it was constructed with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The variant segment means nothing to this handler.
    #[error("{handler} handler does not support variant {variant:?}")]
    UnsupportedVariant {
        /// The handler family.
        handler: HandlerKey,
        /// The variant it was given.
        variant: String,
    },

    /// The variant names an axis that does not exist.
    #[error(transparent)]
    InvalidAxis(#[from] CommandError),

    /// A collaborator this handler needs was not supplied to the window.
    #[error("{handler} handler needs a {collaborator}")]
    MissingCollaborator {
        /// The handler family.
        handler: HandlerKey,
        /// What is missing.
        collaborator: &'static str,
    },
}

/// Failure to turn a discovered control into a binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The handler key is not known to the registry.
    #[error("no handler {key:?} for control {control:?}")]
    UnknownHandler {
        /// The control name.
        control: String,
        /// The key taken from the name.
        key: String,
    },

    /// A factory for this key is already registered.
    #[error("handler {key} registered twice")]
    DuplicateHandler {
        /// The duplicated key.
        key: HandlerKey,
    },

    /// The factory was found but construction failed.
    #[error("could not construct {key} handler for control {control:?}: {source}")]
    Construction {
        /// The control name.
        control: String,
        /// The resolved handler key.
        key: HandlerKey,
        /// The handler's own error.
        #[source]
        source: HandlerError,
    },
}

impl BindingError {
    /// Name of the control the failure concerns, if any
    pub fn control(&self) -> Option<&str> {
        match self {
            BindingError::UnknownHandler { control, .. }
            | BindingError::Construction { control, .. } => Some(control),
            BindingError::DuplicateHandler { .. } => None,
        }
    }
}

/// Failure to read a menu layout description.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported layout format: {0:?}")]
    UnsupportedFormat(String),
}
