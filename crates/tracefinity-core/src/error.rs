//! Error handling for Tracefinity
//!
//! Provides error types for the layers that can fail:
//! - Store errors (tool and bin persistence)
//! - Regeneration errors (the external solid generation service)
//! - Model errors (malformed geometry or unknown ids)
//!
//! Geometry and editing never fail; invalid edits are refused without an error.

use thiserror::Error;

/// Tool or bin store error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The requested record does not exist
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The record kind ("tool" or "bin").
        kind: &'static str,
        /// The missing id.
        id: String,
    },

    /// The write conflicts with the stored state
    #[error("Conflict while writing {id}: {reason}")]
    Conflict {
        /// The id being written.
        id: String,
        /// Why the write was rejected.
        reason: String,
    },

    /// The store could not be reached
    #[error("Store transport error: {message}")]
    Transport {
        /// A message describing the transport failure.
        message: String,
    },
}

impl StoreError {
    pub fn tool_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "tool",
            id: id.into(),
        }
    }

    pub fn bin_not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind: "bin",
            id: id.into(),
        }
    }
}

/// Regeneration service error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegenerationError {
    /// The service reported a failure
    #[error("Generation failed: {message}")]
    Failed {
        /// The message reported by the service.
        message: String,
    },

    /// The request was superseded or aborted
    #[error("Generation cancelled")]
    Cancelled,

    /// The service answered with something unusable
    #[error("Invalid generation response: {reason}")]
    InvalidResponse {
        /// What was wrong with the response.
        reason: String,
    },
}

impl RegenerationError {
    /// Cancellation is not a failure and must not be surfaced to the user.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RegenerationError::Cancelled)
    }
}

/// Model error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A ring has fewer than three points
    #[error("Ring has {points} points, at least 3 are required")]
    DegenerateRing {
        /// The number of points found.
        points: usize,
    },

    /// An id does not refer to any entity in the collection
    #[error("Unknown {kind} id: {id}")]
    UnknownId {
        /// The entity kind.
        kind: &'static str,
        /// The unknown id.
        id: String,
    },
}

/// Main error type for Tracefinity
#[derive(Error, Debug)]
pub enum Error {
    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Regeneration error
    #[error(transparent)]
    Regeneration(#[from] RegenerationError),

    /// Model error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// JSON (de)serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

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

    /// Check if this error is a cancelled regeneration
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Regeneration(e) if e.is_cancelled())
    }

    /// Check if this is a store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
