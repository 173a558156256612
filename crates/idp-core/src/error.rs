//! Error handling for the identity platform kernel.
//!
//! Error messages are informative for debugging while not exposing
//! sensitive configuration values to end users.

use thiserror::Error;

/// Result type alias using the platform error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for platform kernel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The process-wide configuration was installed more than once.
    #[error("configuration already initialized")]
    AlreadyInitialized,

    /// The process-wide configuration was read before installation.
    #[error("configuration not initialized")]
    NotInitialized,
}

impl Error {
    /// Returns whether this error indicates a startup-ordering bug.
    #[must_use]
    pub const fn is_init_error(&self) -> bool {
        matches!(self, Self::AlreadyInitialized | Self::NotInitialized)
    }
}
