use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Main error type for the murmur membership service
#[derive(Debug)]
pub enum MurmurError {
    /// Configuration or CLI argument errors
    Config(String),

    /// No peer is currently eligible as a gossip target
    EmptyQueue,

    /// Membership payload encoding/decoding errors
    Serialization(SerializationError),

    /// Peer unreachable or the push was rejected
    Transport(String),

    /// System I/O errors
    Io(std::io::Error),

    /// Internal lock poisoning or concurrency errors
    Concurrency(String),
}

/// Serialization related errors
#[derive(Debug)]
pub enum SerializationError {
    /// Our own membership view could not be encoded
    Encode(serde_json::Error),

    /// A payload received from a peer could not be decoded
    Decode(serde_json::Error),
}

impl fmt::Display for MurmurError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MurmurError::Config(msg) => write!(f, "Configuration error: {}", msg),
            MurmurError::EmptyQueue => write!(f, "No members in cluster to gossip with"),
            MurmurError::Serialization(err) => write!(f, "Serialization error: {}", err),
            MurmurError::Transport(msg) => write!(f, "Transport error: {}", msg),
            MurmurError::Io(err) => write!(f, "I/O error: {}", err),
            MurmurError::Concurrency(msg) => write!(f, "Concurrency error: {}", msg),
        }
    }
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::Encode(err) => write!(f, "encode: {}", err),
            SerializationError::Decode(err) => write!(f, "decode: {}", err),
        }
    }
}

impl std::error::Error for MurmurError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MurmurError::Io(err) => Some(err),
            MurmurError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializationError::Encode(err) => Some(err),
            SerializationError::Decode(err) => Some(err),
        }
    }
}

// Convenient type alias for Results using our error type
pub type Result<T> = std::result::Result<T, MurmurError>;

// Axum IntoResponse implementation for HTTP error responses
impl IntoResponse for MurmurError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_response = json!({
            "error": {
                "code": status_code.as_u16(),
                "message": self.to_string(),
                "type": self.error_type(),
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl MurmurError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            MurmurError::Config(_) => StatusCode::BAD_REQUEST,
            MurmurError::EmptyQueue => StatusCode::SERVICE_UNAVAILABLE,
            MurmurError::Serialization(SerializationError::Decode(_)) => StatusCode::BAD_REQUEST,
            MurmurError::Serialization(SerializationError::Encode(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            MurmurError::Transport(_) => StatusCode::BAD_GATEWAY,
            MurmurError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MurmurError::Concurrency(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            MurmurError::Config(_) => "configuration_error",
            MurmurError::EmptyQueue => "empty_queue",
            MurmurError::Serialization(_) => "serialization_error",
            MurmurError::Transport(_) => "transport_error",
            MurmurError::Io(_) => "io_error",
            MurmurError::Concurrency(_) => "concurrency_error",
        }
    }

    /// Every error in the membership subsystem is survivable: the next
    /// gossip round gets another chance.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MurmurError::Config(_) | MurmurError::Io(_))
    }
}

// Conversions from common error types
impl From<std::io::Error> for MurmurError {
    fn from(err: std::io::Error) -> Self {
        MurmurError::Io(err)
    }
}

impl From<SerializationError> for MurmurError {
    fn from(err: SerializationError) -> Self {
        MurmurError::Serialization(err)
    }
}

impl From<reqwest::Error> for MurmurError {
    fn from(err: reqwest::Error) -> Self {
        MurmurError::Transport(err.to_string())
    }
}

// Helper macros for common error construction patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::MurmurError::Config($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::MurmurError::Config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! transport_error {
    ($msg:expr) => {
        $crate::error::MurmurError::Transport($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::MurmurError::Transport(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! concurrency_error {
    ($msg:expr) => {
        $crate::error::MurmurError::Concurrency($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::MurmurError::Concurrency(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").unwrap_err()
    }

    #[test]
    fn test_error_display() {
        let config_err = MurmurError::Config("Invalid port".to_string());
        assert_eq!(config_err.to_string(), "Configuration error: Invalid port");

        assert_eq!(
            MurmurError::EmptyQueue.to_string(),
            "No members in cluster to gossip with"
        );

        let io_err = MurmurError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));
        assert!(io_err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let murmur_err: MurmurError = io_err.into();
        assert!(matches!(murmur_err, MurmurError::Io(_)));

        let murmur_err: MurmurError = SerializationError::Decode(decode_error()).into();
        assert!(matches!(
            murmur_err,
            MurmurError::Serialization(SerializationError::Decode(_))
        ));
    }

    #[test]
    fn test_status_codes() {
        let decode = MurmurError::Serialization(SerializationError::Decode(decode_error()));
        assert_eq!(decode.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(decode.error_type(), "serialization_error");

        let encode = MurmurError::Serialization(SerializationError::Encode(decode_error()));
        assert_eq!(encode.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            MurmurError::EmptyQueue.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            transport_error!("connection refused").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(MurmurError::EmptyQueue.is_recoverable());
        assert!(transport_error!("peer down").is_recoverable());
        assert!(!config_error!("bad address").is_recoverable());
    }

    #[test]
    fn test_macros() {
        let err = config_error!("Port {} is invalid", 65536);
        assert_eq!(
            err.to_string(),
            "Configuration error: Port 65536 is invalid"
        );

        let err = concurrency_error!("Mutex lock fail {}", "poisoned");
        assert_eq!(err.to_string(), "Concurrency error: Mutex lock fail poisoned");
    }
}
