//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! bb-cli checkout
//! bb-cli checkout --delivery --payment mobile --note "No lid please"
//! ```
//!
//! An active loyalty discount (from `profile scan` or `profile redeem`) is
//! applied to the order and consumed once the order is recorded.

use brew_buddy_core::{Order, OrderRequest, OrderType, PaymentMethod, place_order};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::Session;
use crate::error::CliError;

/// Place an order for everything in the cart.
///
/// # Errors
///
/// Returns `CliError::Checkout` for an empty cart or a failed submission, and
/// `CliError::Store` if the loyalty profile cannot be read. Once the order is
/// recorded it is always returned; a failure to save the used-up discount is
/// only logged.
pub fn run(
    session: &Session,
    delivery: bool,
    payment: PaymentMethod,
    note: Option<String>,
    now: DateTime<Utc>,
) -> Result<Order, CliError> {
    let mut profile = session.profile_file.load()?;
    let discount = profile.take_discount();

    let request = OrderRequest {
        order_type: if delivery {
            OrderType::Delivery
        } else {
            OrderType::Pickup
        },
        payment_method: payment,
        special_instructions: note,
        discount,
    };

    let order = place_order(
        &session.cart,
        request,
        &session.config.checkout,
        &session.orders,
        now,
    )?;

    if order.discount.is_some() {
        match session.profile_file.save(&profile) {
            Ok(()) => info!(order_id = %order.id, "Loyalty discount used"),
            Err(e) => warn!(
                order_id = %order.id,
                error = %e,
                "Order placed but the used discount could not be cleared from the profile"
            ),
        }
    }
    Ok(order)
}

/// Render an order receipt.
#[must_use]
pub fn receipt(order: &Order) -> Vec<String> {
    let summary = &order.summary;
    let mut lines = vec![format!("Order {} ({})", order.id, order.status)];
    lines.extend(order.items.iter().map(|item| {
        format!(
            "  {} x{} {} = {}",
            item.size.label(),
            item.quantity,
            item.name,
            item.line_total()
        )
    }));
    lines.push(format!("Subtotal: {}", summary.subtotal));
    if let Some(discount) = &order.discount {
        lines.push(format!("Discount ({}): -{}", discount.label(), summary.discount));
    }
    lines.push(format!("Tax: {}", summary.tax));
    if order.order_type == OrderType::Delivery {
        lines.push(format!("Delivery: {}", summary.delivery_fee));
    }
    lines.push(format!("Total: {}", summary.total));
    lines.push(format!(
        "{} via {} payment, ready around {}",
        order.order_type,
        order.payment_method,
        order.estimated_ready_at.format("%H:%M UTC")
    ));
    if let Some(note) = &order.special_instructions {
        lines.push(format!("Note: {note}"));
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use brew_buddy_core::{CheckoutError, Discount, LoyaltyProfile, Price};

    use super::*;
    use crate::commands::cart;
    use crate::config::CliConfig;

    fn session(dir: &tempfile::TempDir) -> Session {
        Session::open(CliConfig::with_data_dir(dir.path()), None).unwrap()
    }

    #[test]
    fn test_checkout_records_order_and_clears_cart() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        cart::add(&session.cart, &session.catalog, "2", None, &[], 2).unwrap();

        let order = run(&session, false, PaymentMethod::Credit, None, Utc::now()).unwrap();

        // 9.00 + 8% tax
        assert_eq!(order.summary.total, Price::from_cents(972));
        assert!(session.cart.is_empty());
        assert_eq!(session.orders.history().unwrap(), vec![order]);
    }

    #[test]
    fn test_checkout_empty_cart_keeps_discount() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        let mut profile = LoyaltyProfile::default();
        profile.redeem_code("DISCOUNT20").unwrap();
        session.profile_file.save(&profile).unwrap();

        let result = run(&session, false, PaymentMethod::Credit, None, Utc::now());

        assert!(matches!(
            result,
            Err(CliError::Checkout(CheckoutError::EmptyCart))
        ));
        assert_eq!(
            session.profile_file.load().unwrap().active_discount,
            Some(Discount::Percent(20))
        );
    }

    #[test]
    fn test_profile_save_failure_still_returns_order() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        let mut profile = LoyaltyProfile::default();
        profile.redeem_code("DISCOUNT20").unwrap();
        session.profile_file.save(&profile).unwrap();
        cart::add(&session.cart, &session.catalog, "2", None, &[], 1).unwrap();
        // A directory at the temporary path makes the profile write fail.
        let mut blocker = session.config.profile_path().into_os_string();
        blocker.push(".tmp");
        std::fs::create_dir_all(&blocker).unwrap();

        let order = run(&session, false, PaymentMethod::Credit, None, Utc::now()).unwrap();

        assert_eq!(order.discount, Some(Discount::Percent(20)));
        assert!(session.cart.is_empty());
        assert_eq!(session.orders.history().unwrap(), vec![order]);
    }

    #[test]
    fn test_checkout_consumes_discount() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        let mut profile = LoyaltyProfile::default();
        profile.redeem_code("DISCOUNT20").unwrap();
        session.profile_file.save(&profile).unwrap();
        cart::add(&session.cart, &session.catalog, "4", None, &[], 1).unwrap();

        let order = run(&session, true, PaymentMethod::Mobile, None, Utc::now()).unwrap();

        assert_eq!(order.discount, Some(Discount::Percent(20)));
        assert_eq!(session.profile_file.load().unwrap().active_discount, None);
        let lines = receipt(&order);
        assert!(lines.iter().any(|line| line.starts_with("Discount")));
        assert!(lines.iter().any(|line| line.starts_with("Delivery")));
    }
}
