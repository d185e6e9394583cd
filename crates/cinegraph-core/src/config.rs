//! Configuration management for Cinegraph services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`CINEGRAPH_` prefix, `__` between sections,
//!    e.g. `CINEGRAPH_NEO4J__PASSWORD`)
//! 2. Config file (`cinegraph.toml` by default)
//! 3. Defaults

use serde::Deserialize;

use crate::error::CinegraphError;

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Connection settings for the backing Neo4j store.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Upper bound on a single query round-trip, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// Settings for the cached title list.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// How long a fetched title list stays fresh, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_username() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "cinegraph-dev".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            username: default_username(),
            password: default_password(),
            timeout_secs: default_timeout_secs(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Settings {
    /// Load settings from `<file_prefix>.{toml,yaml,json}` (optional) and the environment.
    pub fn load(file_prefix: &str) -> Result<Self, CinegraphError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("CINEGRAPH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(uri = %settings.neo4j.uri, file_prefix, "Loaded settings");
        Ok(settings)
    }

    /// Reject values that would make every query fail.
    pub fn validate(&self) -> Result<(), CinegraphError> {
        if self.neo4j.uri.trim().is_empty() {
            return Err(CinegraphError::InvalidSetting {
                key: "neo4j.uri".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.neo4j.timeout_secs == 0 {
            return Err(CinegraphError::InvalidSetting {
                key: "neo4j.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.neo4j.max_connections == 0 {
            return Err(CinegraphError::InvalidSetting {
                key: "neo4j.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
