//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Add a large cappuccino with two add-ons
//! bb-cli cart add 2 --size large --option "Extra shot" --option "Almond milk"
//!
//! # Change or remove a row (full line id or a unique prefix)
//! bb-cli cart set 3f2a 2
//! bb-cli cart remove 3f2a
//!
//! bb-cli cart show
//! bb-cli cart clear
//! ```

use brew_buddy_core::pricing::DRINK_OPTIONS;
use brew_buddy_core::{Cart, Catalog, LineId, OptionSet, ProductId, Size};
use tracing::info;

use crate::error::CliError;

/// Find a row by its full id or by a prefix that matches exactly one row.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if nothing or more than one row
/// matches.
pub fn resolve_line(cart: &Cart, line: &str) -> Result<LineId, CliError> {
    if let Ok(id) = line.parse::<LineId>() {
        return Ok(id);
    }

    let prefix = line.trim().to_lowercase();
    if prefix.is_empty() {
        return Err(CliError::InvalidArgument("line id cannot be empty".to_owned()));
    }

    let matches: Vec<LineId> = cart
        .items()
        .iter()
        .map(|item| item.id)
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::InvalidArgument(format!("no cart line matches {line}"))),
        _ => Err(CliError::InvalidArgument(format!(
            "{line} matches more than one cart line"
        ))),
    }
}

/// Add a configured product to the cart.
///
/// # Errors
///
/// Returns an error for an unknown product, size or option, or a zero
/// quantity.
pub fn add(
    cart: &Cart,
    catalog: &Catalog,
    product: &str,
    size: Option<&str>,
    options: &[String],
    quantity: u32,
) -> Result<LineId, CliError> {
    let size = match size {
        Some(size) => size
            .parse::<Size>()
            .map_err(|e| CliError::Pricing(e.into()))?,
        None => Size::default(),
    };

    let mut selected = OptionSet::new();
    for option in options {
        let known = DRINK_OPTIONS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(option.trim()))
            .ok_or_else(|| CliError::InvalidArgument(format!("unknown option: {option}")))?;
        selected.insert(known);
    }

    let item = catalog.line_item(&ProductId::new(product), size, selected, quantity)?;
    info!(
        product = %item.name,
        size = %item.size,
        unit_price = %item.unit_price,
        "Pricing drink"
    );
    Ok(cart.add_item(item)?)
}

/// Remove a row.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if the line id does not resolve.
pub fn remove(cart: &Cart, line: &str) -> Result<(), CliError> {
    let id = resolve_line(cart, line)?;
    if cart.remove_item(id).is_none() {
        info!(line_id = %id, "Nothing to remove");
    }
    Ok(())
}

/// Set a row's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns an error if the line id does not resolve or the quantity is out
/// of range.
pub fn set_quantity(cart: &Cart, line: &str, quantity: i64) -> Result<(), CliError> {
    let id = resolve_line(cart, line)?;
    cart.update_quantity(id, quantity)?;
    Ok(())
}

/// Render the cart contents and totals.
#[must_use]
pub fn show(cart: &Cart) -> Vec<String> {
    let items = cart.items();
    if items.is_empty() {
        return vec!["Your cart is empty".to_owned()];
    }

    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            let short_id: String = item.id.to_string().chars().take(8).collect();
            let options = if item.options.is_empty() {
                String::new()
            } else {
                format!(" + {}", item.options)
            };
            format!(
                "{short_id}  {} x{} {}{options} @ {} = {}",
                item.size.label(),
                item.quantity,
                item.name,
                item.unit_price,
                item.line_total()
            )
        })
        .collect();
    lines.push(format!(
        "{} item(s), subtotal {}",
        cart.total_items(),
        cart.subtotal()
    ));
    lines
}
