//! Error handling for the ZenMotion Rust client

use std::fmt;
use thiserror::Error;

/// Unified error type for the ZenMotion Rust client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Local file errors from the session store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// Authentication and session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Rejected user input
    #[error("Invalid {field}: {message}")]
    Validation {
        field: String,
        message: String,
    },

    /// Session store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error for a named field
    pub fn validation<F: fmt::Display, T: fmt::Display>(field: F, msg: T) -> Self {
        Error::Validation {
            field: field.to_string(),
            message: msg.to_string(),
        }
    }

    /// Create a new storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// The HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
