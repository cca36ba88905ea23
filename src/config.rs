//! # Shop Configuration
//!
//! Tunables for the storefront, loaded from a TOML file. Every field has a default, so a
//! file only needs the keys it changes:
//!
//! ```toml
//! free_delivery_threshold = 40.0
//! upsell_ids = ["item_4", "item_9"]
//! ```
//!
//! [`ShopConfig::load`] reads the file named by `AROMA_CONFIG` when it is set and falls
//! back to the defaults otherwise.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "AROMA_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    /// Storage key the cart lines are saved under.
    pub cart_storage_key: String,
    /// JSON file backing cart storage.
    pub cart_path: PathBuf,
    pub delivery_fee: f64,
    /// Subtotal from which delivery is free.
    pub free_delivery_threshold: f64,
    /// How many featured dishes the home page shows.
    pub featured_limit: usize,
    /// Dishes the cart drawer suggests, by cart item id.
    pub upsell_ids: Vec<String>,
    /// Request queue capacity of each collection actor.
    pub actor_buffer: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            cart_storage_key: "indian-aroma-cart".to_string(),
            cart_path: PathBuf::from("cart.json"),
            delivery_fee: 3.50,
            free_delivery_threshold: 35.0,
            featured_limit: 3,
            upsell_ids: Vec::new(),
            actor_buffer: 32,
        }
    }
}

impl ShopConfig {
    /// Loads from `$AROMA_CONFIG` if set, otherwise returns the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                debug!("{CONFIG_ENV} not set, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cart_storage_key.is_empty() {
            return Err(ConfigError::Invalid("cart_storage_key must not be empty".into()));
        }
        let amounts = [self.delivery_fee, self.free_delivery_threshold];
        if amounts.iter().any(|a| !a.is_finite() || *a < 0.0) {
            return Err(ConfigError::Invalid(
                "delivery amounts must be non-negative".into(),
            ));
        }
        if self.actor_buffer == 0 {
            return Err(ConfigError::Invalid("actor_buffer must be at least 1".into()));
        }
        Ok(())
    }
}
