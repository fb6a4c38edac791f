//! Unified CLI error type.
//!
//! Every command returns `Result<T, CliError>`; `main` logs the error and
//! exits with a non-zero status.

use brew_buddy_core::{
    CartError, CatalogError, CheckoutError, LoyaltyError, PricingError, StoreError,
};
use thiserror::Error;

use crate::config::ConfigError;
use crate::store::CatalogFileError;

/// Application-level error type for the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A data file could not be read or written.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The catalog file could not be read or written.
    #[error("Catalog file error: {0}")]
    CatalogFile(#[from] CatalogFileError),

    /// The cart rejected an operation.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The catalog rejected an operation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A drink could not be priced.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// A loyalty operation failed.
    #[error("Loyalty error: {0}")]
    Loyalty(#[from] LoyaltyError),

    /// A command-line value was not acceptable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
