//! Persistent location store collaborator.
//!
//! The resolver and the fleet search only see the narrow interface defined
//! here. A store hands out request-scoped sessions: callers acquire one per
//! request, borrow it for every lookup, and release it by dropping it on
//! every exit path.
//!
//! [`InMemoryStore`] is the implementation the server runs against. It
//! holds a snapshot loaded from a JSON file.

mod error;
mod memory;
mod pattern;
#[cfg(test)]
pub(crate) mod stub;

use std::future::Future;

use crate::domain::{NamedPoint, VehicleRecord};

pub use error::StoreError;
pub use memory::{InMemorySession, InMemoryStore, LocationRecord, Snapshot, TaxiRecord};
pub use pattern::LikePattern;

/// Source of request-scoped store sessions.
pub trait LocationStore: Send + Sync {
    type Session: StoreSession;

    /// Acquire a session for one request.
    fn acquire(&self) -> impl Future<Output = Result<Self::Session, StoreError>> + Send;
}

/// Read-only queries available on a store session.
///
/// All queries return empty results rather than failing on "not found";
/// I/O faults surface as [`StoreError`].
pub trait StoreSession: Send + Sync {
    /// First active location whose name matches `pattern`.
    fn find_by_name_like(
        &self,
        pattern: &LikePattern,
    ) -> impl Future<Output = Result<Option<NamedPoint>, StoreError>> + Send;

    /// Active locations whose name or description contains `substring`,
    /// case-insensitively, at most `limit` of them.
    fn search_by_name_or_description(
        &self,
        substring: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<NamedPoint>, StoreError>> + Send;

    /// Every active location.
    fn list_active(&self) -> impl Future<Output = Result<Vec<NamedPoint>, StoreError>> + Send;

    /// Vehicles currently marked available.
    fn list_available_vehicles(
        &self,
    ) -> impl Future<Output = Result<Vec<VehicleRecord>, StoreError>> + Send;
}

/// A missing session fails every query with [`StoreError::Unavailable`].
///
/// This lets a request whose session could not be acquired still run the
/// lookups that need no store.
impl<S: StoreSession> StoreSession for Option<S> {
    async fn find_by_name_like(
        &self,
        pattern: &LikePattern,
    ) -> Result<Option<NamedPoint>, StoreError> {
        match self {
            Some(session) => session.find_by_name_like(pattern).await,
            None => Err(StoreError::Unavailable),
        }
    }

    async fn search_by_name_or_description(
        &self,
        substring: &str,
        limit: usize,
    ) -> Result<Vec<NamedPoint>, StoreError> {
        match self {
            Some(session) => session.search_by_name_or_description(substring, limit).await,
            None => Err(StoreError::Unavailable),
        }
    }

    async fn list_active(&self) -> Result<Vec<NamedPoint>, StoreError> {
        match self {
            Some(session) => session.list_active().await,
            None => Err(StoreError::Unavailable),
        }
    }

    async fn list_available_vehicles(&self) -> Result<Vec<VehicleRecord>, StoreError> {
        match self {
            Some(session) => session.list_available_vehicles().await,
            None => Err(StoreError::Unavailable),
        }
    }
}
