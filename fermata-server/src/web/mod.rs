//! JSON HTTP surface for the trip planner.
//!
//! Handlers only parse requests, call the planner and map its typed
//! results onto responses.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Planner};
