//! Error types for the EIP rotator
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for rotator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the EIP rotator
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or empty environment values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// DNS API errors
    #[error("DNS error: {0}")]
    Dns(String),

    /// A provider answered but the response lacked a required field
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a DNS error
    pub fn dns(msg: impl Into<String>) -> Self {
        Self::Dns(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error was raised before any remote call was attempted
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
