//! Error types for skosview.

use thiserror::Error;

/// Result type alias using skosview's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the remote Skosmos API.
///
/// `status` is `None` when the request never produced an HTTP response
/// (connection refused, timeout, DNS failure).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Skosmos API error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Network-level failure with no HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}

/// Core error type for skosview operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required setting or query parameter is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// The API failure carried by this error, if any.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
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
        Error::Api(ApiError::new(e.status().map(|s| s.as_u16()), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing vocabulary id".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing vocabulary id");
    }

    #[test]
    fn test_api_error_display_with_status() {
        let err = Error::Api(ApiError::new(Some(404), "Not Found"));
        assert_eq!(err.to_string(), "Skosmos API error (404): Not Found");
    }

    #[test]
    fn test_api_error_display_without_status() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.to_string(), "Skosmos API error: connection refused");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("host default".to_string());
        assert_eq!(err.to_string(), "Not found: host default");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("bad id".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad id");
    }

    #[test]
    fn test_as_api() {
        let err: Error = ApiError::new(Some(500), "boom").into();
        assert_eq!(err.as_api().and_then(|e| e.status), Some(500));
        assert!(Error::Config("x".into()).as_api().is_none());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
