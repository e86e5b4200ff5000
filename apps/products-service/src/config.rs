//! Products service configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

/// Products service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Advertised port (logged at startup; the bus needs no listener)
    pub port: u16,

    /// NATS server URLs
    pub nats_servers: Vec<String>,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Maximum pooled database connections
    pub db_max_connections: u32,

    /// Subjects are `<prefix>.<command>`
    pub subject_prefix: String,

    /// Queue group shared by all instances
    pub queue_group: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            port: 3001,
            nats_servers: vec!["nats://localhost:4222".to_string()],
            database_path: PathBuf::from("./data/products.db"),
            db_max_connections: 5,
            subject_prefix: "products".to_string(),
            queue_group: "products-service".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
            None => defaults.port,
        };

        let nats_servers = match lookup("NATS_SERVERS") {
            Some(raw) => {
                let servers: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if servers.is_empty() {
                    return Err(ConfigError::InvalidValue("NATS_SERVERS".to_string()));
                }
                servers
            }
            None => defaults.nats_servers,
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string())),
            },
            None => defaults.db_max_connections,
        };

        let config = ServiceConfig {
            port,
            nats_servers,
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            db_max_connections,
            subject_prefix: lookup("SUBJECT_PREFIX").unwrap_or(defaults.subject_prefix),
            queue_group: lookup("QUEUE_GROUP").unwrap_or(defaults.queue_group),
        };

        if config.subject_prefix.trim().is_empty() {
            return Err(ConfigError::MissingRequired("SUBJECT_PREFIX".to_string()));
        }
        if config.queue_group.trim().is_empty() {
            return Err(ConfigError::MissingRequired("QUEUE_GROUP".to_string()));
        }

        Ok(config)
    }

    /// Wildcard subject the listener subscribes to.
    pub fn subscription_subject(&self) -> String {
        format!("{}.*", self.subject_prefix)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.subscription_subject(), "products.*");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "4000"),
            ("NATS_SERVERS", "nats://a:4222, nats://b:4222"),
            ("DATABASE_PATH", "/tmp/catalog.db"),
            ("SUBJECT_PREFIX", "catalog"),
        ])
        .unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.nats_servers, vec!["nats://a:4222", "nats://b:4222"]);
        assert_eq!(config.database_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.subscription_subject(), "catalog.*");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "PORT"
        ));
        assert!(load(&[("NATS_SERVERS", " , ")]).is_err());
        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(matches!(
            load(&[("QUEUE_GROUP", "")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
