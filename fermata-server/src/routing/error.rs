//! Routing error types.

use crate::domain::ErrorKind;

/// Errors from a route provider.
///
/// Display strings are the messages shown to API clients.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    /// 401 from the API
    #[error("Authentication failed - check API key")]
    Unauthorized,

    /// 404 from the API
    #[error("No route found between specified locations")]
    NoRoute,

    /// 422 from the API
    #[error("Invalid input parameters")]
    InvalidParameters,

    /// 429 from the API
    #[error("Rate limit exceeded")]
    RateLimited,

    /// 500 from the API
    #[error("Gebeta API server error")]
    ServerError,

    /// Any other non-success status
    #[error("API error (status {0})")]
    Status(u16),

    /// The request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded
    #[error("Error parsing response: {0}")]
    Decode(String),
}

impl RoutingError {
    /// Map a non-success HTTP status to its error.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => RoutingError::Unauthorized,
            404 => RoutingError::NoRoute,
            422 => RoutingError::InvalidParameters,
            429 => RoutingError::RateLimited,
            500 => RoutingError::ServerError,
            other => RoutingError::Status(other),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RoutingError::Timeout => ErrorKind::Timeout,
            RoutingError::NoRoute => ErrorKind::NotFound,
            _ => ErrorKind::UpstreamFailure,
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RoutingError::Timeout
        } else if err.is_decode() {
            RoutingError::Decode(err.to_string())
        } else {
            RoutingError::Network(err.to_string())
        }
    }
}
