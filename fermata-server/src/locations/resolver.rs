//! Place-name resolution through an ordered chain of lookup tiers.
//!
//! Free text is normalized once, then each tier is tried in turn until one
//! produces a point:
//!
//! 1. exact gazetteer key
//! 2. store name match (substring, then words with anything between them)
//! 3. fuzzy match over gazetteer keys
//! 4. fuzzy match over active store location names
//!
//! A store failure only fails its own tier; resolution carries on with the
//! next one. Only exhausting every tier yields [`ResolutionOutcome::Unresolved`].

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::NamedPoint;
use crate::store::{LikePattern, StoreSession};

use super::fuzzy::{DEFAULT_CUTOFF, best_match};
use super::gazetteer::Gazetteer;
use super::normalize::normalize;

/// Which tier produced a resolution. Reported for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchTier {
    ExactGazetteer,
    StoreExact,
    FuzzyGazetteer,
    FuzzyStore,
}

impl MatchTier {
    /// The default tier order.
    pub const ALL: [MatchTier; 4] = [
        MatchTier::ExactGazetteer,
        MatchTier::StoreExact,
        MatchTier::FuzzyGazetteer,
        MatchTier::FuzzyStore,
    ];
}

/// Result of resolving one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Resolved { point: NamedPoint, tier: MatchTier },
    Unresolved,
}

impl ResolutionOutcome {
    pub fn point(&self) -> Option<&NamedPoint> {
        match self {
            ResolutionOutcome::Resolved { point, .. } => Some(point),
            ResolutionOutcome::Unresolved => None,
        }
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            ResolutionOutcome::Resolved { tier, .. } => Some(*tier),
            ResolutionOutcome::Unresolved => None,
        }
    }
}

/// Resolver tuning.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Minimum similarity for the fuzzy tiers.
    pub cutoff: f64,

    /// Tiers to try, in order.
    pub tiers: Vec<MatchTier>,
}

impl ResolverConfig {
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_tiers(mut self, tiers: impl Into<Vec<MatchTier>>) -> Self {
        self.tiers = tiers.into();
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            tiers: MatchTier::ALL.to_vec(),
        }
    }
}

/// Turns free-text place names into points.
///
/// Holds no per-request state; store access goes through the session the
/// caller passes in.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    gazetteer: Arc<Gazetteer>,
    config: ResolverConfig,
}

impl LocationResolver {
    pub fn new(gazetteer: Arc<Gazetteer>, config: ResolverConfig) -> Self {
        Self { gazetteer, config }
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve free text to a point, trying each tier in order.
    pub async fn resolve<S: StoreSession>(&self, session: &S, raw: &str) -> ResolutionOutcome {
        let key = normalize(raw);
        if key.is_empty() {
            debug!(query = raw, "Empty place name after normalization");
            return ResolutionOutcome::Unresolved;
        }

        for &tier in &self.config.tiers {
            if let Some(point) = self.try_tier(tier, session, &key).await {
                debug!(query = raw, ?tier, name = point.name(), "Resolved place name");
                return ResolutionOutcome::Resolved { point, tier };
            }
        }

        warn!(query = raw, "Could not resolve place name");
        ResolutionOutcome::Unresolved
    }

    async fn try_tier<S: StoreSession>(
        &self,
        tier: MatchTier,
        session: &S,
        key: &str,
    ) -> Option<NamedPoint> {
        match tier {
            MatchTier::ExactGazetteer => self.gazetteer.lookup_exact(key).cloned(),
            MatchTier::StoreExact => self.store_name_match(session, key).await,
            MatchTier::FuzzyGazetteer => self.fuzzy_gazetteer(key),
            MatchTier::FuzzyStore => self.fuzzy_store(session, key).await,
        }
    }

    async fn store_name_match<S: StoreSession>(&self, session: &S, key: &str) -> Option<NamedPoint> {
        let mut patterns = vec![LikePattern::contains(key)];
        if key.contains(' ') {
            patterns.push(LikePattern::contains_words(key));
        }

        for pattern in &patterns {
            match session.find_by_name_like(pattern).await {
                Ok(Some(point)) => return Some(point),
                Ok(None) => {}
                Err(e) => {
                    warn!(%pattern, error = %e, "Store name lookup failed");
                    return None;
                }
            }
        }
        None
    }

    fn fuzzy_gazetteer(&self, key: &str) -> Option<NamedPoint> {
        let hit = best_match(key, self.gazetteer.keys(), self.config.cutoff)?;
        debug!(key, candidate = hit.candidate, score = hit.score, "Fuzzy gazetteer match");
        self.gazetteer.lookup_exact(hit.candidate).cloned()
    }

    async fn fuzzy_store<S: StoreSession>(&self, session: &S, key: &str) -> Option<NamedPoint> {
        let locations = match session.list_active().await {
            Ok(locations) => locations,
            Err(e) => {
                warn!(error = %e, "Listing store locations failed");
                return None;
            }
        };

        let names: Vec<String> = locations.iter().map(|l| l.name().to_lowercase()).collect();
        let hit = best_match(key, names.iter().map(String::as_str), self.config.cutoff)?;
        debug!(key, candidate = hit.candidate, score = hit.score, "Fuzzy store match");
        locations.into_iter().nth(hit.index)
    }

    /// Search for places whose name contains the query.
    ///
    /// Gazetteer matches come first in table order, then store matches in
    /// store order. Results are de-duplicated by name (first occurrence
    /// wins) and capped at `limit`. They are not ranked by relevance.
    pub async fn search<S: StoreSession>(
        &self,
        session: &S,
        query: &str,
        limit: usize,
    ) -> Vec<NamedPoint> {
        let key = normalize(query);
        if key.is_empty() || limit == 0 {
            return Vec::new();
        }

        let from_gazetteer: Vec<NamedPoint> = self
            .gazetteer
            .entries()
            .iter()
            .filter(|e| e.key.contains(&key) || e.point.name().to_lowercase().contains(&key))
            .map(|e| e.point.clone())
            .collect();

        let from_store = match session.search_by_name_or_description(&key, limit).await {
            Ok(points) => points,
            Err(e) => {
                warn!(query, error = %e, "Store search failed");
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        from_gazetteer
            .into_iter()
            .chain(from_store)
            .filter(|p| seen.insert(p.name().to_string()))
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::stub::StubStore;

    fn resolver() -> LocationResolver {
        LocationResolver::new(Arc::new(Gazetteer::addis_ababa()), ResolverConfig::default())
    }

    #[tokio::test]
    async fn exact_gazetteer_match() {
        let store = StubStore::new();
        let outcome = resolver().resolve(&store, "Mexico").await;

        let point = outcome.point().unwrap();
        assert_eq!(point.latitude(), 8.989022);
        assert_eq!(point.longitude(), 38.79036);
        assert_eq!(outcome.tier(), Some(MatchTier::ExactGazetteer));
    }

    #[tokio::test]
    async fn exact_match_ignores_case_and_punctuation() {
        let store = StubStore::new();
        let outcome = resolver().resolve(&store, "  AYERTENA!! ").await;
        assert_eq!(outcome.point().unwrap().name(), "Ayertena");
        assert_eq!(outcome.tier(), Some(MatchTier::ExactGazetteer));
    }

    #[tokio::test]
    async fn exact_match_never_touches_store() {
        let store = StubStore::new().with_location("Mexico Square", 9.0, 38.7);
        let outcome = resolver().resolve(&store, "bole airport").await;

        assert_eq!(outcome.tier(), Some(MatchTier::ExactGazetteer));
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn store_substring_match() {
        let store = StubStore::new().with_location("Sarbet Roundabout", 8.998, 38.733);
        let outcome = resolver().resolve(&store, "sarbet").await;

        assert_eq!(outcome.point().unwrap().name(), "Sarbet Roundabout");
        assert_eq!(outcome.tier(), Some(MatchTier::StoreExact));
    }

    #[tokio::test]
    async fn store_match_tolerates_missing_spaces() {
        let store = StubStore::new().with_location("GofaCamp", 8.98, 38.74);
        let outcome = resolver().resolve(&store, "Gofa Camp").await;

        assert_eq!(outcome.point().unwrap().name(), "GofaCamp");
        assert_eq!(outcome.tier(), Some(MatchTier::StoreExact));
        // Substring pattern first, then the word pattern.
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test]
    async fn fuzzy_gazetteer_match() {
        let store = StubStore::new();
        let outcome = resolver().resolve(&store, "ayertna").await;

        assert_eq!(outcome.point().unwrap().name(), "Ayertena");
        assert_eq!(outcome.tier(), Some(MatchTier::FuzzyGazetteer));
    }

    #[tokio::test]
    async fn fuzzy_store_match() {
        let store = StubStore::new().with_location("Jemo Condominium", 8.96, 38.71);
        let outcome = resolver().resolve(&store, "jemo condominum").await;

        assert_eq!(outcome.point().unwrap().name(), "Jemo Condominium");
        assert_eq!(outcome.tier(), Some(MatchTier::FuzzyStore));
    }

    #[tokio::test]
    async fn unresolvable_input() {
        let store = StubStore::new().with_location("Sarbet", 8.998, 38.733);
        assert_eq!(
            resolver().resolve(&store, "zzzznotaplace").await,
            ResolutionOutcome::Unresolved
        );
        assert_eq!(
            resolver().resolve(&store, "xyz").await,
            ResolutionOutcome::Unresolved
        );
    }

    #[tokio::test]
    async fn empty_input_matches_nothing() {
        let store = StubStore::new().with_location("Sarbet", 8.998, 38.733);
        assert_eq!(
            resolver().resolve(&store, " ?! ").await,
            ResolutionOutcome::Unresolved
        );
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_falls_through_to_fuzzy_gazetteer() {
        let store = StubStore::new().failing_queries();
        let outcome = resolver().resolve(&store, "merkatto").await;

        assert_eq!(outcome.point().unwrap().name(), "Merkato");
        assert_eq!(outcome.tier(), Some(MatchTier::FuzzyGazetteer));
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn store_failure_everywhere_is_unresolved() {
        let store = StubStore::new().failing_queries();
        let outcome = resolver().resolve(&store, "zzzznotaplace").await;

        assert_eq!(outcome, ResolutionOutcome::Unresolved);
        // Both store tiers were attempted.
        assert_eq!(store.query_count(), 2);
    }

    #[tokio::test]
    async fn tier_order_is_configurable() {
        let config = ResolverConfig::default().with_tiers([MatchTier::StoreExact, MatchTier::ExactGazetteer]);
        let resolver = LocationResolver::new(Arc::new(Gazetteer::addis_ababa()), config);
        let store = StubStore::new().with_location("Mexico Square", 9.0, 38.7);

        let outcome = resolver.resolve(&store, "mexico").await;
        assert_eq!(outcome.point().unwrap().name(), "Mexico Square");
        assert_eq!(outcome.tier(), Some(MatchTier::StoreExact));
    }

    #[tokio::test]
    async fn stricter_cutoff_rejects_typos() {
        let config = ResolverConfig::default().with_cutoff(0.95);
        let resolver = LocationResolver::new(Arc::new(Gazetteer::addis_ababa()), config);
        let store = StubStore::new();

        assert_eq!(
            resolver.resolve(&store, "ayertna").await,
            ResolutionOutcome::Unresolved
        );
    }

    #[tokio::test]
    async fn search_orders_gazetteer_then_store() {
        let store = StubStore::new()
            .with_location("Bole Medhanialem", 8.99, 38.78)
            .with_location("Bole", 8.9806, 38.7578);

        let results = resolver().search(&store, "bole", 10).await;
        let names: Vec<_> = results.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Bole", "Bole Airport", "Bole Medhanialem"]);
    }

    #[tokio::test]
    async fn search_dedupes_by_name_and_limits() {
        let store = StubStore::new();

        // "aau" and "addis ababa university" share a display name.
        let results = resolver().search(&store, "addis", 10).await;
        let names: Vec<_> = results.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Addis Ababa University", "Addis Ababa"]);

        let limited = resolver().search(&store, "addis", 1).await;
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn search_survives_store_failure() {
        let store = StubStore::new().failing_queries();
        let results = resolver().search(&store, "mall", 10).await;
        let names: Vec<_> = results.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Edna Mall"]);
    }

    #[tokio::test]
    async fn search_with_empty_query_or_zero_limit() {
        let store = StubStore::new().with_location("Sarbet", 8.998, 38.733);
        assert!(resolver().search(&store, "  ", 10).await.is_empty());
        assert!(resolver().search(&store, "sarbet", 0).await.is_empty());
        assert_eq!(store.query_count(), 0);
    }
}
