//! REST call error types.

use http::Method;
use thiserror::Error;

/// Result type for REST call operations.
pub type Result<T> = std::result::Result<T, RestError>;

/// REST call errors.
#[derive(Debug, Error)]
pub enum RestError {
    /// The server answered with a status outside the 2xx range.
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw, unparsed response body.
        body: String,
    },

    /// The response body could not be parsed into the expected type.
    #[error("Malformed {format} body: {message}")]
    MalformedBody {
        /// Name of the wire format that failed.
        format: &'static str,
        /// Parser message.
        message: String,
    },

    /// The outbound payload could not be encoded.
    #[error("Failed to serialize {format} payload: {message}")]
    Serialization {
        /// Name of the wire format that failed.
        format: &'static str,
        /// Serializer message.
        message: String,
    },

    /// Payload submission was asked to use a verb other than POST or PUT.
    #[error("Unsupported method for payload submission: {0}")]
    UnsupportedMethod(Method),

    /// Invalid URL or relative path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid header name or value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The response body was not valid UTF-8 text.
    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    /// Underlying HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RestError {
    /// Get the HTTP status code if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the raw response body attached to a status error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if the response body failed to parse.
    pub fn is_malformed_body(&self) -> bool {
        matches!(self, Self::MalformedBody { .. })
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
