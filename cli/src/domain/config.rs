//! Domain types and validators for cf configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["target", "start.timeout"];

/// Default for `application_start_timeout`, in seconds.
pub const DEFAULT_START_TIMEOUT_SECS: u64 = 600;

pub const DEFAULT_TARGET: &str = "https://api.run.pivotal.io";
pub const DEFAULT_AUTHORIZATION_ENDPOINT: &str = "https://login.run.pivotal.io";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.cf/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CfConfig {
    /// Cloud Controller API endpoint.
    pub target: String,
    pub api_version: String,
    pub authorization_endpoint: String,
    /// Token sent as the `Authorization` header, e.g. `"bearer eyJ..."`.
    pub access_token: String,
    pub organization: NamedTarget,
    pub space: NamedTarget,
    /// Seconds `cf start` waits for every instance to run.
    pub application_start_timeout: u64,
}

/// A targeted organization or space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedTarget {
    pub name: String,
    pub guid: String,
}

impl NamedTarget {
    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.guid.is_empty()
    }
}

impl Default for CfConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            api_version: "2".to_string(),
            authorization_endpoint: DEFAULT_AUTHORIZATION_ENDPOINT.to_string(),
            access_token: String::new(),
            organization: NamedTarget::default(),
            space: NamedTarget::default(),
            application_start_timeout: DEFAULT_START_TIMEOUT_SECS,
        }
    }
}

impl CfConfig {
    #[must_use]
    pub fn start_timeout(&self) -> Duration {
        Duration::from_secs(self.application_start_timeout)
    }

    /// Space GUID that app lookups are scoped to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSpaceTargeted`] if no space has been targeted.
    pub fn space_guid(&self) -> Result<&str, ConfigError> {
        if self.space.is_set() {
            Ok(&self.space.guid)
        } else {
            Err(ConfigError::NoSpaceTargeted)
        }
    }

    /// Apply an already validated `key`/`value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "target" => self.target = value.trim_end_matches('/').to_string(),
            "start.timeout" => self.application_start_timeout = value.parse()?,
            _ => unknown_key(key)?,
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> Result<()> {
    Err(ConfigError::UnknownKey {
        key: key.to_string(),
        valid: VALID_CONFIG_KEYS.join(", "),
    }
    .into())
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return unknown_key(key);
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |expected: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    };
    match key {
        "target" if !(value.starts_with("https://") || value.starts_with("http://")) => {
            Err(invalid("Expected an http:// or https:// URL").into())
        }
        "start.timeout" if !matches!(value.parse::<u64>(), Ok(secs) if secs > 0) => {
            Err(invalid("Expected a positive number of seconds").into())
        }
        _ => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
