//! Taxi trip planner server for Addis Ababa.
//!
//! Resolves free-text place names, fetches a driving route, prices the
//! trip and lists available taxis near the pickup point.

pub mod config;
pub mod domain;
pub mod fleet;
pub mod locations;
pub mod planner;
pub mod pricing;
pub mod routing;
pub mod store;
pub mod web;
