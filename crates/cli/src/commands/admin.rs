//! Catalog management commands.
//!
//! # Usage
//!
//! ```bash
//! # Add a drink (a missing catalog file starts from the default menu)
//! bb-cli --catalog menu.yaml admin add -n "Cold Brew" -p 4.25 -c coffee -t iced -t strong
//!
//! # Replace a drink's details
//! bb-cli --catalog menu.yaml admin update 9 -n "Nitro Cold Brew" -p 4.75 -c coffee
//!
//! # Remove a drink
//! bb-cli --catalog menu.yaml admin remove 9
//! ```

use brew_buddy_core::{Category, NewProduct, Price, ProductId};
use rust_decimal::Decimal;
use tracing::info;

use super::Session;
use crate::error::CliError;
use crate::store::CatalogFile;

/// Product fields as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ProductArgs {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub category: Category,
}

impl ProductArgs {
    fn into_new_product(self) -> Result<NewProduct, CliError> {
        let base_price = Price::new(self.price)
            .map_err(|e| CliError::InvalidArgument(format!("price: {e}")))?;
        Ok(NewProduct {
            name: self.name,
            description: self.description,
            base_price,
            image_url: self.image_url,
            tags: self.tags,
            category: self.category,
        })
    }
}

fn catalog_file(session: &Session) -> Result<&CatalogFile, CliError> {
    session.catalog_file.as_ref().ok_or_else(|| {
        CliError::InvalidArgument("admin commands need --catalog <path>".to_owned())
    })
}

/// Add a product and save the catalog.
///
/// # Errors
///
/// Returns an error if no catalog file was given, the fields are invalid, or
/// the catalog cannot be written.
pub fn add(session: &mut Session, args: ProductArgs) -> Result<ProductId, CliError> {
    let file = catalog_file(session)?.clone();
    let id = session.catalog.add_product(args.into_new_product()?)?;
    file.save(&session.catalog)?;
    info!(product_id = %id, "Catalog saved");
    Ok(id)
}

/// Replace a product's fields and save the catalog.
///
/// # Errors
///
/// Returns an error if no catalog file was given, the product does not exist,
/// the fields are invalid, or the catalog cannot be written.
pub fn update(session: &mut Session, id: &str, args: ProductArgs) -> Result<String, CliError> {
    let file = catalog_file(session)?.clone();
    let product = session
        .catalog
        .update_product(&ProductId::new(id), args.into_new_product()?)?;
    let summary = format!("[{}] {} {}", product.id, product.name, product.base_price);
    file.save(&session.catalog)?;
    Ok(summary)
}

/// Remove a product and save the catalog.
///
/// Lines already in the cart keep their captured name and price.
///
/// # Errors
///
/// Returns an error if no catalog file was given, the product does not exist,
/// or the catalog cannot be written.
pub fn remove(session: &mut Session, id: &str) -> Result<String, CliError> {
    let file = catalog_file(session)?.clone();
    let removed = session.catalog.remove_product(&ProductId::new(id))?;
    file.save(&session.catalog)?;
    Ok(removed.name)
}
