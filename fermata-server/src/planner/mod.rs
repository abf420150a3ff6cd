//! Trip planning.
//!
//! Answers "how do I get from here to there by taxi, what will it cost,
//! and which taxis are close?" by composing location resolution, the
//! routing provider, the fare calculator and the fleet search. Only
//! resolution and routing are mandatory; every other step degrades.

mod config;
mod trip;

pub use config::PlannerConfig;
pub use trip::{PlanError, PlanOptions, Side, TripPlan, TripPlanner};
