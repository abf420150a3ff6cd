//! Process configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::domain::ErrorKind;
use crate::routing::GebetaConfig;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000);
const DEFAULT_SEED_FILE: &str = "data/seed.json";
const DEFAULT_REFRESH_SECS: u64 = 60;

/// A configuration variable that is set but malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid value for {var}: '{value}' ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// Settings for the server binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gebeta: GebetaConfig,
    pub bind_addr: SocketAddr,
    /// JSON snapshot the location store is loaded from.
    pub seed_file: PathBuf,
    /// How often the snapshot is reloaded.
    pub refresh_interval: Duration,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GEBETA_API_KEY").unwrap_or_else(|| {
            warn!("GEBETA_API_KEY not set. Routing calls will fail.");
            String::new()
        });

        let mut gebeta = GebetaConfig::new(api_key);
        if let Some(url) = lookup("GEBETA_BASE_URL") {
            gebeta = gebeta.with_base_url(url);
        }
        if let Some(secs) = parse::<u64>(&lookup, "GEBETA_TIMEOUT_SECS")? {
            gebeta = gebeta.with_timeout(Duration::from_secs(secs));
        }

        let bind_addr =
            parse::<SocketAddr>(&lookup, "FERMATA_BIND_ADDR")?.unwrap_or(DEFAULT_BIND_ADDR);

        let seed_file = lookup("FERMATA_SEED_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_FILE));

        let refresh_secs =
            parse::<u64>(&lookup, "FERMATA_REFRESH_SECS")?.unwrap_or(DEFAULT_REFRESH_SECS);
        if refresh_secs == 0 {
            return Err(ConfigError {
                var: "FERMATA_REFRESH_SECS",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            gebeta,
            bind_addr,
            seed_file,
            refresh_interval: Duration::from_secs(refresh_secs),
        })
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(ConfigError {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
