//! Command implementations.
//!
//! Each command works on a [`Session`] and returns the lines to show the
//! user; `main` decides how to print them.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod menu;
pub mod profile;

use std::path::PathBuf;
use std::sync::Arc;

use brew_buddy_core::{Cart, Catalog, TracingObserver};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::store::{CatalogFile, JsonFileStore, OrderLog, ProfileFile};

/// Everything one CLI invocation works with.
#[derive(Debug)]
pub struct Session {
    pub config: CliConfig,
    pub catalog_file: Option<CatalogFile>,
    pub catalog: Catalog,
    pub cart: Cart,
    pub profile_file: ProfileFile,
    pub orders: OrderLog,
}

impl Session {
    /// Open the session's files. The cart is restored from disk once here.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CatalogFile` if `catalog_path` exists but cannot be
    /// read.
    pub fn open(config: CliConfig, catalog_path: Option<PathBuf>) -> Result<Self, CliError> {
        let catalog_file = catalog_path.map(CatalogFile::new);
        let catalog = match &catalog_file {
            Some(file) => file.load()?,
            None => Catalog::default_menu(),
        };

        let cart = Cart::restore(
            Arc::new(JsonFileStore::new(config.cart_path())),
            Arc::new(TracingObserver),
        );
        let profile_file = ProfileFile::new(config.profile_path());
        let orders = OrderLog::new(config.orders_path());

        Ok(Self {
            config,
            catalog_file,
            catalog,
            cart,
            profile_file,
            orders,
        })
    }
}
