//! Error types for firestock.
//!
//! [`Error`] is what transports and endpoint implementations return when a
//! call cannot produce a response. [`ApiError`] is the uniform value surfaced
//! to UI code, whatever the underlying failure mode was.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using firestock's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for firestock operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Server answered with a non-success status that could not be turned
    /// into a regular response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Authentication missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP/network request failed before a status was received
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status embedded in the error, if any.
    ///
    /// `Unauthorized` always reports 401 so callers can classify it the same
    /// way as a 401 response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Best available human-readable message, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Http { message, .. } => message.clone(),
            Error::Unauthorized(msg)
            | Error::Request(msg)
            | Error::Serialization(msg)
            | Error::Config(msg)
            | Error::InvalidInput(msg)
            | Error::Internal(msg) => msg.clone(),
            Error::Io(e) => e.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) if status.as_u16() == 401 => Error::Unauthorized(e.to_string()),
            Some(status) => Error::Http {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None => Error::Request(e.to_string()),
        }
    }
}

/// Uniform failure value shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} (HTTP {})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl From<&Error> for ApiError {
    fn from(e: &Error) -> Self {
        ApiError::new(e.message(), e.status_code())
    }
}
