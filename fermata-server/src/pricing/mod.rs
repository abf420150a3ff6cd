//! Taxi fare calculation.
//!
//! Fares are a flat base plus distance and time components, with an
//! optional long-distance discount and time-of-day surcharges, clamped to
//! a minimum and maximum and rounded to a multiple of five.

mod fare;
mod period;

pub use fare::{AppliedMultipliers, FareBreakdown, FareCalculator, FareRange, PricingConfig};
pub use period::TimePeriod;
