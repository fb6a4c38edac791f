//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BREW_BUDDY_DATA_DIR` - Directory for cart, profile and order files (default: .brew-buddy)
//! - `BREW_BUDDY_TAX_RATE` - Checkout tax rate as a fraction (default: 0.08)
//! - `BREW_BUDDY_DELIVERY_FEE` - Delivery surcharge (default: 2.99)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use brew_buddy_core::{CheckoutPolicy, Price};
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".brew-buddy";
const CART_FILE: &str = "brew_buddy_cart.json";
const PROFILE_FILE: &str = "profile.json";
const ORDERS_FILE: &str = "orders.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding the session's data files
    pub data_dir: PathBuf,
    /// Tax rate and delivery fee
    pub checkout: CheckoutPolicy,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("BREW_BUDDY_DATA_DIR", DEFAULT_DATA_DIR));
        let tax_rate: Decimal = parse_env("BREW_BUDDY_TAX_RATE", "0.08")?;
        let delivery_fee: Decimal = parse_env("BREW_BUDDY_DELIVERY_FEE", "2.99")?;

        let delivery_fee = Price::new(delivery_fee).map_err(|e| {
            ConfigError::InvalidEnvVar("BREW_BUDDY_DELIVERY_FEE".to_string(), e.to_string())
        })?;
        let checkout = CheckoutPolicy::new(tax_rate, delivery_fee).map_err(|e| {
            ConfigError::InvalidEnvVar("BREW_BUDDY_TAX_RATE".to_string(), e.to_string())
        })?;

        Ok(Self { data_dir, checkout })
    }

    /// Configuration rooted at `data_dir` with default checkout charges.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            checkout: CheckoutPolicy::default(),
        }
    }

    #[must_use]
    pub fn cart_path(&self) -> PathBuf {
        self.data_dir.join(CART_FILE)
    }

    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    #[must_use]
    pub fn orders_path(&self) -> PathBuf {
        self.data_dir.join(ORDERS_FILE)
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
