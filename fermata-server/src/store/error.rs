//! Store error types.

use crate::domain::ErrorKind;

/// Errors raised by a location store.
///
/// "Not found" is never an error: lookups return `None` or an empty list.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// No session could be acquired for this request
    #[error("store unavailable: no session")]
    Unavailable,

    /// A query failed inside the store
    #[error("store query failed: {message}")]
    Query { message: String },

    /// A snapshot file could not be read or parsed
    #[error("failed to load snapshot {path}: {message}")]
    Load { path: String, message: String },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::UpstreamFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(StoreError::Unavailable.to_string(), "store unavailable: no session");

        let err = StoreError::Query {
            message: "connection reset".into(),
        };
        assert_eq!(err.to_string(), "store query failed: connection reset");

        let err = StoreError::Load {
            path: "data/seed.json".into(),
            message: "expected value".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load snapshot data/seed.json: expected value"
        );
        assert_eq!(err.kind(), ErrorKind::UpstreamFailure);
    }
}
