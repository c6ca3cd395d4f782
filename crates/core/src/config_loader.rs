use crate::config::SignalConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Environment variable prefix; nested keys use `__`, e.g.
/// `INSTI_THRESHOLDS__BUY=0.8`.
pub const ENV_PREFIX: &str = "INSTI_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the signal configuration from defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override cannot be parsed or the
    /// merged configuration fails validation.
    pub fn load() -> Result<SignalConfig> {
        Self::extract(Self::base())
    }

    /// Loads the signal configuration with a TOML file layered between the
    /// defaults and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or the
    /// merged configuration fails validation.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<SignalConfig> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let figment = Figment::from(Serialized::defaults(SignalConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(figment)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(SignalConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn extract(figment: Figment) -> Result<SignalConfig> {
        let config: SignalConfig = figment.extract()?;
        config.validate()?;
        tracing::debug!(?config, "Loaded signal configuration");
        Ok(config)
    }
}
