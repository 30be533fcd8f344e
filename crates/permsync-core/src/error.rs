//! Error types for the permsync core library.

use thiserror::Error;

/// Result type alias using the permsync [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Frontegg migration operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (unreadable settings, missing environment)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vendor authentication failed or returned no token
    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// A listing endpoint returned a non-success status or a malformed body
    #[error("Fetch failed ({status}): {message}")]
    Fetch { status: u16, message: String },

    /// The permission creation endpoint returned a non-success status
    #[error("Migration failed ({status}): {message}")]
    Migrate { status: u16, message: String },

    /// Two categories in one environment share a name
    #[error("Duplicate category name \"{name}\" in environment \"{environment}\"")]
    DuplicateCategory { environment: String, name: String },

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
