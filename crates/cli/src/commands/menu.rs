//! Menu listing.
//!
//! # Usage
//!
//! ```bash
//! bb-cli menu
//! bb-cli menu --category smoothie
//! bb-cli menu --search latte
//! ```

use brew_buddy_core::pricing::{self, DRINK_OPTIONS};
use brew_buddy_core::{Catalog, Category, Product, Size};

use crate::error::CliError;

/// Render one product with its per-size prices.
///
/// # Errors
///
/// Returns `CliError::Pricing` if the product cannot be priced.
pub fn describe(product: &Product) -> Result<String, CliError> {
    let mut sizes = Vec::with_capacity(Size::ALL.len());
    for size in Size::ALL {
        let price = pricing::size_price(product.base_price.amount(), size)?;
        sizes.push(format!("{} {price}", size.label()));
    }
    Ok(format!(
        "[{}] {} ({}) - {} | {}",
        product.id,
        product.name,
        product.category,
        product.description,
        sizes.join(" / ")
    ))
}

/// List products, optionally narrowed by category and search text.
///
/// # Errors
///
/// Returns `CliError::Pricing` if a product cannot be priced.
pub fn list(
    catalog: &Catalog,
    category: Option<Category>,
    search: Option<&str>,
) -> Result<Vec<String>, CliError> {
    let products = catalog
        .search(search.unwrap_or_default())
        .into_iter()
        .filter(|product| category.is_none_or(|c| product.category == c));

    let mut lines = products.map(describe).collect::<Result<Vec<_>, _>>()?;
    if lines.is_empty() {
        lines.push("No drinks match.".to_owned());
    } else {
        lines.push(format!("Options (+$0.50 each): {}", DRINK_OPTIONS.join(", ")));
    }
    Ok(lines)
}
