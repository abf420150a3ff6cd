//! Error taxonomy shared by every layer.
//!
//! Each concrete error type reports one of these kinds, which the web
//! layer maps to a status code and callers use to decide whether a
//! failure is worth retrying.

use serde::Serialize;

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Location, route or record absent
    NotFound,
    /// External router or store I/O failed
    UpstreamFailure,
    /// Malformed input rejected before any I/O
    InvalidInput,
    /// Bounded wait on an external call exceeded
    Timeout,
}
