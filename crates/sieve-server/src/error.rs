//! Server error types.

use thiserror::Error;

/// Error returned by a [`Handler`](crate::Handler).
///
/// Endpoints turn it into a `500` error response.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Response serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The handler failed with a message.
    #[error("Handler error: {0}")]
    Failed(String),

    /// The handler failed with an underlying error.
    #[error("Handler error: {0}")]
    Custom(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Creates a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error returned while building a [`Registry`](crate::Registry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two endpoints were registered for the same route.
    #[error("route {0} registered more than once")]
    DuplicateRoute(String),

    /// A handler was attached to a route that was never declared.
    #[error("route {0} is not declared")]
    UnknownRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_display() {
        assert_eq!(
            HandlerError::failed("db down").to_string(),
            "Handler error: db down"
        );

        let err: HandlerError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error"));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = HandlerError::Custom(Box::new(io));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_registry_error_display() {
        assert_eq!(
            RegistryError::DuplicateRoute("/find".into()).to_string(),
            "route /find registered more than once"
        );
    }
}
