//! Configuration for the Motive server.
//!
//! Loaded from environment variables, after `.env` has been applied by the
//! binary. The store credentials are required; everything else has a default.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Configuration could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {key}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Supabase project settings.
    pub supabase: SupabaseConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

/// Supabase project settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://<ref>.supabase.co`.
    pub url: String,
    /// Service key sent with every request.
    pub key: String,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Port for the Prometheus exporter; no exporter when unset.
    pub metrics_port: Option<u16>,
}

impl ServerConfig {
    /// `host:port` the API listens on.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Address of the Prometheus exporter, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `HOST` is not an IP address.
    pub fn metrics_address(&self) -> Result<Option<SocketAddr>, ConfigError> {
        let Some(port) = self.metrics_port else {
            return Ok(None);
        };
        let ip = self.host.parse().map_err(|_| ConfigError::Invalid {
            key: "HOST",
            value: self.host.clone(),
        })?;
        Ok(Some(SocketAddr::new(ip, port)))
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `SUPABASE_URL` or `SUPABASE_KEY` is
    /// missing, or a port is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let port = |key: &'static str| -> Result<Option<u16>, ConfigError> {
            lookup(key)
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::Invalid { key, value })
                })
                .transpose()
        };

        Ok(Self {
            supabase: SupabaseConfig {
                url: required("SUPABASE_URL")?,
                key: required("SUPABASE_KEY")?,
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: port("PORT")?.unwrap_or(8080),
                metrics_port: port("METRICS_PORT")?,
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "secret"),
        ])
        .unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.server.metrics_port, None);
        assert_eq!(config.server.metrics_address().unwrap(), None);
    }

    #[test]
    fn test_missing_credentials() {
        assert_eq!(
            load(&[("SUPABASE_KEY", "secret")]).unwrap_err(),
            ConfigError::Missing("SUPABASE_URL")
        );
        assert_eq!(
            load(&[("SUPABASE_URL", "https://abc.supabase.co"), ("SUPABASE_KEY", " ")])
                .unwrap_err(),
            ConfigError::Missing("SUPABASE_KEY")
        );
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "secret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("METRICS_PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(
            config.server.metrics_address().unwrap(),
            Some("127.0.0.1:9000".parse().unwrap())
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "secret"),
            ("PORT", "eighty"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_key_is_redacted() {
        let config = load(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_KEY", "secret"),
        ])
        .unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
