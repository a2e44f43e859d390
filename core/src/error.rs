//! Error types for the directory API client.
//!
//! # Design
//! Transport faults, HTTP status faults, content-type faults and decode
//! faults each get their own variant so callers can tell "the network broke"
//! apart from "the server answered with something that is not directory
//! data." The distinction matters in practice: a single sign-on layer
//! answers expired sessions with a perfectly successful HTML page, which
//! must not be confused with a malformed payload.

use std::fmt;

/// Errors returned by `DirectoryClient` parse methods, plus the transport
/// variant hosts use when the round-trip itself fails.
#[derive(Debug)]
pub enum ApiError {
    /// The transport failed before a usable response arrived (DNS failure,
    /// connection refused, timeout). Built by the executing host, never by
    /// the parse methods themselves.
    Transport(String),

    /// The server returned a non-2xx status. Carries the raw status code
    /// and body for debugging.
    HttpError { status: u16, body: String },

    /// The response did not declare an `application/json` content type.
    /// Carries whatever content type was found, if any.
    ContentType(Option<String>),

    /// The response body could not be deserialized into the expected shape,
    /// including records missing required organisational structure.
    DeserializationError(String),
}

impl ApiError {
    /// Wrap a transport-level failure reported by the executing host.
    pub fn transport(err: impl fmt::Display) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport failure: {msg}"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::ContentType(Some(found)) => {
                write!(f, "expected application/json, got content type {found}")
            }
            ApiError::ContentType(None) => {
                write!(f, "expected application/json, got no content type")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
