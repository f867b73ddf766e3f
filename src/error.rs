//! Error types for the Inklet API client.

use thiserror::Error;

/// Errors returned by the Inklet client.
#[derive(Error, Debug)]
pub enum InkletError {
    /// The request never completed (DNS, connect, transport timeout).
    /// There is no HTTP status for these.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the status text when the
        /// body had none.
        message: String,
    },

    /// A success response did not match the endpoint's contract type.
    #[error("unexpected response shape: {message}")]
    Decode {
        /// The underlying serde error, rendered.
        message: String,
        /// Leading bytes of the offending body, for diagnosis.
        snippet: String,
    },

    /// JSON serialization or deserialization failed locally.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Session persistence I/O failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl InkletError {
    /// Status code for API errors; `None` for everything else
    /// (network failures in particular carry no status).
    pub fn status(&self) -> Option<u16> {
        match self {
            InkletError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request never reached the server.
    pub fn is_network(&self) -> bool {
        matches!(self, InkletError::Http(_))
    }
}

/// Result type for Inklet operations.
pub type Result<T> = std::result::Result<T, InkletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_status() {
        let err = InkletError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "API error (404): Not found");
    }

    #[test]
    fn decode_error_has_no_status() {
        let err = InkletError::Decode {
            message: "missing field `id`".to_string(),
            snippet: "{\"post\":{}}".to_string(),
        };
        assert_eq!(err.status(), None);
    }
}
