//! Place-name resolution.
//!
//! Turns ambiguous, typo-prone text into coordinates: a normalizer, a fixed
//! gazetteer, an approximate matcher and the tiered resolver that combines
//! them with the location store.

mod fuzzy;
mod gazetteer;
mod normalize;
mod popular;
mod resolver;

pub use fuzzy::{DEFAULT_CUTOFF, FuzzyMatch, best_match, similarity};
pub use gazetteer::{Gazetteer, GazetteerEntry};
pub use normalize::normalize;
pub use popular::{PopularRoute, popular_endpoints, popular_route, popular_routes};
pub use resolver::{LocationResolver, MatchTier, ResolutionOutcome, ResolverConfig};
