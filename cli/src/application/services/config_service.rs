//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::CfConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<CfConfig> {
    store.load()
}

/// Validate and apply one setting, then persist the result.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or if the configuration
/// cannot be loaded or saved. Nothing is written on validation failure.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<CfConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
