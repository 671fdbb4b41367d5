//! Configuration loader (defaults + file + env merge).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::GateConfig;

/// Prefix for environment overrides, e.g. `TOOLGATE_SERVER__LISTEN`.
pub const ENV_PREFIX: &str = "TOOLGATE_";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`TOOLGATE_` prefix, `__` between sections)
pub fn load_config(config_path: Option<&str>) -> Result<GateConfig, ConfigError> {
    layered(config_path)
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

fn layered(config_path: Option<&str>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(GateConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}
