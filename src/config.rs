use crate::domain::policy::PricingPolicy;
use crate::error::Result;
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Settings file read when no `--config` path is given.
pub const DEFAULT_CONFIG_FILE: &str = "netprice.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: PricingPolicy,
}

impl Settings {
    /// Loads settings from `config_path`, or from [`DEFAULT_CONFIG_FILE`]
    /// when it exists.
    ///
    /// An explicit path must be readable. A missing or broken default file
    /// is logged and the defaults are used instead.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if config_path.is_none() && !Path::new(DEFAULT_CONFIG_FILE).exists() {
            warn!("{DEFAULT_CONFIG_FILE} not found. Using default configuration.");
            return Ok(Self::default());
        }

        match Self::load_from_file(config_path) {
            Ok(settings) => Ok(settings),
            Err(err) if config_path.is_none() => {
                warn!("Could not read config file: {err}. Using default configuration.");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    fn load_from_file(config_path: Option<&Path>) -> Result<Self> {
        let source = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }
}
