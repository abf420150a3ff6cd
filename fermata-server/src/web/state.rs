//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::TripPlanner;
use crate::routing::{CachedRouter, GebetaClient};
use crate::store::InMemoryStore;

/// The planner the server runs: snapshot store plus cached Gebeta routing.
pub type Planner = TripPlanner<InMemoryStore, CachedRouter<GebetaClient>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
}

impl AppState {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
