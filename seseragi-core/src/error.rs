//! # Error Handling
//!
//! Error types shared across the Seseragi crates.
//!
//! The cache core performs no I/O, so the taxonomy is short: callers can
//! hand us bad arguments, and a broken invariant can be detected at
//! runtime. Invariant violations are never recovered from; they are
//! surfaced so the bug stays visible.

use thiserror::Error;

/// Result type alias for Seseragi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Primary error type for Seseragi
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("internal invariant violated: {message}")]
    Internal { message: String },
}

impl Error {
    /// Shorthand for an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Shorthand for an internal-inconsistency error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Check if error is recoverable by correcting the call
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::InvalidArgument { .. } => true,
            Error::Internal { .. } => false,
        }
    }

    /// Get error code for monitoring
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Error::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
