//! # Configuration
//!
//! Everything the intake system needs to start: model credentials and endpoint, the
//! simulated notification recipient, and the ledger's handling of unidentified orders.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `GEMINI_API_KEY` | `api_key` | *(required)* |
//! | `ORDER_INTAKE_MODEL` | `model` | `gemini-2.5-flash` |
//! | `ORDER_INTAKE_API_BASE` | `api_base_url` | Generative Language API |
//! | `ORDER_INTAKE_TIMEOUT_SECS` | `request_timeout` | 60 |
//! | `ORDER_INTAKE_RECIPIENT` | `recipient` | `relation@example.com` |
//! | `ORDER_INTAKE_UNKEYED` | `unkeyed_policy` | `single-slot` |
//!
//! The binary reads the same variables through `clap`; library users call
//! [`IntakeConfig::from_env`].

use crate::extraction::gemini::{AUTH_ENV_VAR, DEFAULT_API_BASE};
use crate::extraction::DEFAULT_MODEL;
use crate::ledger::DEFAULT_BUFFER;
use ledger_framework::UnkeyedPolicy;
use std::time::Duration;
use thiserror::Error;

pub const MODEL_ENV_VAR: &str = "ORDER_INTAKE_MODEL";
pub const API_BASE_ENV_VAR: &str = "ORDER_INTAKE_API_BASE";
pub const TIMEOUT_ENV_VAR: &str = "ORDER_INTAKE_TIMEOUT_SECS";
pub const RECIPIENT_ENV_VAR: &str = "ORDER_INTAKE_RECIPIENT";
pub const UNKEYED_ENV_VAR: &str = "ORDER_INTAKE_UNKEYED";

/// Default address shown as the (simulated) notification recipient.
pub const DEFAULT_RECIPIENT: &str = "relation@example.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("API key is not set. Pass --api-key or set {AUTH_ENV_VAR}.")]
    MissingApiKey,

    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, PartialEq)]
pub struct IntakeConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub recipient: String,
    pub ledger_buffer: usize,
    pub unkeyed_policy: UnkeyedPolicy,
}

impl std::fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("recipient", &self.recipient)
            .field("ledger_buffer", &self.ledger_buffer)
            .field("unkeyed_policy", &self.unkeyed_policy)
            .finish()
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            recipient: DEFAULT_RECIPIENT.to_string(),
            ledger_buffer: DEFAULT_BUFFER,
            unkeyed_policy: UnkeyedPolicy::default(),
        }
    }
}

impl IntakeConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`; unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(key) = get(AUTH_ENV_VAR) {
            config.api_key = key.trim().to_string();
        }
        if let Some(model) = get(MODEL_ENV_VAR) {
            config.model = model.trim().to_string();
        }
        if let Some(base) = get(API_BASE_ENV_VAR) {
            config.api_base_url = base.trim().to_string();
        }
        if let Some(raw) = get(TIMEOUT_ENV_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    name: TIMEOUT_ENV_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(recipient) = get(RECIPIENT_ENV_VAR) {
            config.recipient = recipient.trim().to_string();
        }
        if let Some(raw) = get(UNKEYED_ENV_VAR) {
            config.unkeyed_policy =
                raw.parse::<UnkeyedPolicy>().map_err(|e| ConfigError::InvalidValue {
                    name: UNKEYED_ENV_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(config)
    }

    /// Checks the values that cannot be defaulted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: MODEL_ENV_VAR,
                value: self.model.clone(),
                reason: "model name must not be empty".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: TIMEOUT_ENV_VAR,
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        if self.ledger_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                name: "ledger_buffer",
                value: "0".to_string(),
                reason: "channel capacity must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = IntakeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, IntakeConfig::default());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.recipient, "relation@example.com");
        assert_eq!(config.unkeyed_policy, UnkeyedPolicy::SingleSlot);
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_values_are_read() {
        let config = IntakeConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", " abc "),
            ("ORDER_INTAKE_MODEL", "gemini-2.0-flash"),
            ("ORDER_INTAKE_TIMEOUT_SECS", "15"),
            ("ORDER_INTAKE_RECIPIENT", "ops@example.com"),
            ("ORDER_INTAKE_UNKEYED", "always-admit"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.recipient, "ops@example.com");
        assert_eq!(config.unkeyed_policy, UnkeyedPolicy::AlwaysAdmit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = IntakeConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")])).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::MissingApiKey));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = IntakeConfig::from_lookup(lookup(&[("ORDER_INTAKE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == TIMEOUT_ENV_VAR));

        let err = IntakeConfig::from_lookup(lookup(&[("ORDER_INTAKE_UNKEYED", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == UNKEYED_ENV_VAR));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = IntakeConfig {
            api_key: "super-secret".into(),
            ..IntakeConfig::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
