//! Trip planner configuration.

use std::time::Duration;

/// Configuration parameters for trip planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Radius of the nearby-vehicle search around the origin (km).
    pub nearby_radius_km: f64,

    /// Longest wait for the routing provider.
    pub route_timeout: Duration,
}

impl PlannerConfig {
    pub fn with_nearby_radius_km(mut self, radius_km: f64) -> Self {
        self.nearby_radius_km = radius_km;
        self
    }

    pub fn with_route_timeout(mut self, timeout: Duration) -> Self {
        self.route_timeout = timeout;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            nearby_radius_km: 2.0,
            route_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.nearby_radius_km, 2.0);
        assert_eq!(config.route_timeout, Duration::from_secs(30));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::default()
            .with_nearby_radius_km(5.0)
            .with_route_timeout(Duration::from_millis(250));

        assert_eq!(config.nearby_radius_km, 5.0);
        assert_eq!(config.route_timeout, Duration::from_millis(250));
    }
}
