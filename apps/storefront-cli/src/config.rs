//! Storefront CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                     | Default                                   |
//! |------------------------------|-------------------------------------------|
//! | `SHOPVERSE_STORES_PATH`      | `apps/storefront-cli/assets/stores.json`  |
//! | `SHOPVERSE_NEARBY_RADIUS_KM` | `10.0`                                    |
//! | `SHOPVERSE_SHIPPING_FEE`     | `20000`                                   |

use std::env;
use std::path::PathBuf;

use shopverse_core::validation::{validate_amount, validate_radius_km};
use shopverse_core::{Money, DEFAULT_NEARBY_RADIUS_KM, DEFAULT_SHIPPING_FEE};

const STORES_PATH: &str = "SHOPVERSE_STORES_PATH";
const NEARBY_RADIUS_KM: &str = "SHOPVERSE_NEARBY_RADIUS_KM";
const SHIPPING_FEE: &str = "SHOPVERSE_SHIPPING_FEE";

const DEFAULT_STORES_PATH: &str = "apps/storefront-cli/assets/stores.json";

/// Storefront CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Store catalog document
    pub stores_path: PathBuf,

    /// Radius of `nearby` when `--radius-km` is not given
    pub nearby_radius_km: f64,

    /// Flat shipping fee added at checkout
    pub shipping_fee: Money,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of
    /// a variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = AppConfig {
            stores_path: lookup(STORES_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORES_PATH)),

            nearby_radius_km: match lookup(NEARBY_RADIUS_KM) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(NEARBY_RADIUS_KM.to_string()))?,
                None => DEFAULT_NEARBY_RADIUS_KM,
            },

            shipping_fee: match lookup(SHIPPING_FEE) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map(Money::from_minor)
                    .map_err(|_| ConfigError::InvalidValue(SHIPPING_FEE.to_string()))?,
                None => DEFAULT_SHIPPING_FEE,
            },
        };

        if validate_radius_km(config.nearby_radius_km).is_err() {
            return Err(ConfigError::InvalidValue(NEARBY_RADIUS_KM.to_string()));
        }

        if validate_amount("shipping_fee", config.shipping_fee).is_err() {
            return Err(ConfigError::InvalidValue(SHIPPING_FEE.to_string()));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
