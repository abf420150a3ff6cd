//! External road-routing collaborator.
//!
//! The planner only needs distance, travel time and a path between two
//! points. [`RouteProvider`] is that seam; [`GebetaClient`] implements it
//! against the Gebeta Directions API and [`CachedRouter`] memoises any
//! provider's successful answers.

mod cache;
mod client;
mod error;
mod types;

use std::future::Future;

pub use cache::{CacheConfig, CachedRouter};
pub use client::{GebetaClient, GebetaConfig};
pub use error::RoutingError;
pub use types::{Route, RouteRequest};

/// Computes road routes between coordinates.
pub trait RouteProvider: Send + Sync {
    fn route(&self, request: &RouteRequest)
    -> impl Future<Output = Result<Route, RoutingError>> + Send;
}
