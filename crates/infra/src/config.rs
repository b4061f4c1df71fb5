//! Configuration loading and representation.
//!
//! All settings come from environment variables; every one has a default
//! except `DATABASE_URL` and `SEED_FILE`, whose absence selects the in-memory
//! store and skips seeding respectively.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `DATABASE_URL`; `None` selects the in-memory catalog store.
    pub database_url: Option<String>,
    /// `SEED_FILE`; JSON array of products inserted when the store is empty.
    pub seed_file: Option<PathBuf>,
    /// `GRAPHQL_PLAYGROUND`
    pub graphql_playground: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            seed_file: None,
            graphql_playground: true,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw.trim().parse::<SocketAddr>().map_err(|e| {
                ConfigError::Invalid {
                    key: "BIND_ADDR",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.bind_addr,
        };

        let graphql_playground = match get("GRAPHQL_PLAYGROUND") {
            Some(raw) => parse_bool("GRAPHQL_PLAYGROUND", &raw)?,
            None => defaults.graphql_playground,
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            seed_file: get("SEED_FILE").map(PathBuf::from),
            graphql_playground,
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected a boolean (true/false)".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_every_setting() {
        let cfg = config_from(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://localhost/stockroom"),
            ("SEED_FILE", "/etc/stockroom/seed.json"),
            ("GRAPHQL_PLAYGROUND", "off"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(
            cfg.database_url.as_deref(),
            Some("postgres://localhost/stockroom")
        );
        assert_eq!(cfg.seed_file, Some(PathBuf::from("/etc/stockroom/seed.json")));
        assert!(!cfg.graphql_playground);
    }

    #[test]
    fn blank_database_url_selects_in_memory_store() {
        let cfg = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn rejects_malformed_bind_addr() {
        let err = config_from(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));
    }

    #[test]
    fn rejects_malformed_boolean() {
        let err = config_from(&[("GRAPHQL_PLAYGROUND", "maybe")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"maybe\" for GRAPHQL_PLAYGROUND: expected a boolean (true/false)"
        );
    }
}
