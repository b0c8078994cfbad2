//! Service configuration read from `DVIMPORT_*` environment variables.
use dvimport_core::ExclusionSet;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CONFIG/{key}: expected {expected}, got `{value}`")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (`DVIMPORT_ADDR`)
    pub addr: String,
    /// Timeout for each Dataverse request (`DVIMPORT_FETCH_TIMEOUT_SECS`)
    pub fetch_timeout: Duration,
    /// Fields ignored during comparison (`DVIMPORT_EXCLUDED_FIELDS`, comma separated)
    pub excluded_fields: ExclusionSet,
    /// Emit JSON log lines (`DVIMPORT_LOG_JSON`)
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            excluded_fields: ExclusionSet::default(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("DVIMPORT_ADDR") {
            config.addr = addr;
        }

        if let Some(raw) = lookup("DVIMPORT_FETCH_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DVIMPORT_FETCH_TIMEOUT_SECS",
                    expected: "a positive number of seconds",
                    value: raw.clone(),
                })?;
            config.fetch_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("DVIMPORT_EXCLUDED_FIELDS") {
            config.excluded_fields = ExclusionSet::new(
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty()),
            );
        }

        if let Some(raw) = lookup("DVIMPORT_LOG_JSON") {
            config.log_json = parse_bool(&raw).ok_or(ConfigError::Invalid {
                key: "DVIMPORT_LOG_JSON",
                expected: "a boolean",
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8000");
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.excluded_fields, ExclusionSet::default());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DVIMPORT_ADDR", "127.0.0.1:9000"),
            ("DVIMPORT_FETCH_TIMEOUT_SECS", "5"),
            ("DVIMPORT_EXCLUDED_FIELDS", "datasetContact, ,distributor,"),
            ("DVIMPORT_LOG_JSON", "true"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(
            config.excluded_fields,
            ExclusionSet::new(["datasetContact", "distributor"])
        );
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load(&[("DVIMPORT_FETCH_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("DVIMPORT_FETCH_TIMEOUT_SECS", "0")]).is_err());
        assert_eq!(
            load(&[("DVIMPORT_LOG_JSON", "maybe")]).unwrap_err(),
            ConfigError::Invalid {
                key: "DVIMPORT_LOG_JSON",
                expected: "a boolean",
                value: "maybe".to_string(),
            }
        );
    }
}
