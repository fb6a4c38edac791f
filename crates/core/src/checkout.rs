//! Order placement.
//!
//! Tax, delivery surcharge and discounts are applied here, on top of the
//! cart's subtotal. The cart itself knows nothing about them.
//!
//! ```text
//! discounted = subtotal − min(discount, subtotal)
//! tax        = round2(discounted × tax_rate)
//! total      = discounted + tax + delivery_fee (delivery orders only)
//! ```

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cart::{Cart, LineItem, StoreError};
use crate::types::{OrderId, OrderStatus, OrderType, PaymentMethod, Price, round2};

/// Minutes between placing an order and its estimated ready time.
pub const READY_ESTIMATE_MINUTES: i64 = 30;

/// Errors from checkout.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A tax rate outside 0..=1.
    #[error("invalid tax rate: {0}")]
    InvalidTaxRate(Decimal),

    /// An order amount is too large to represent.
    #[error("order total too large")]
    AmountOverflow,

    /// The order could not be submitted. The cart was left as it was.
    #[error("order submission failed: {0}")]
    Submit(#[from] SubmitError),
}

/// Errors from an [`OrderSubmitter`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The backend refused the order.
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The order could not be recorded.
    #[error("order storage failed: {0}")]
    Storage(#[from] StoreError),
}

/// Shop-wide charges applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    /// Fraction of the discounted subtotal charged as tax.
    pub tax_rate: Decimal,
    /// Flat surcharge for delivery orders.
    pub delivery_fee: Price,
}

impl CheckoutPolicy {
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTaxRate`] if `tax_rate` is not within
    /// 0 and 1.
    pub fn new(tax_rate: Decimal, delivery_fee: Price) -> Result<Self, CheckoutError> {
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(CheckoutError::InvalidTaxRate(tax_rate));
        }
        Ok(Self {
            tax_rate,
            delivery_fee,
        })
    }
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            delivery_fee: Price::from_cents(299),
        }
    }
}

/// A reduction applied to one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage off the subtotal (20 means 20%).
    Percent(u8),
    /// Fixed amount off the subtotal.
    Amount(Price),
    /// The cheapest drink in the order is free.
    FreeDrink,
}

impl Discount {
    /// Amount taken off `items`, never more than their subtotal.
    #[must_use]
    pub fn amount_off(&self, items: &[LineItem]) -> Price {
        let subtotal: Price = items.iter().map(LineItem::line_total).sum();
        let off = match *self {
            Self::Percent(percent) => {
                let fraction = Decimal::new(i64::from(percent.min(100)), 2);
                subtotal
                    .amount()
                    .checked_mul(fraction)
                    .and_then(|off| Price::round(off).ok())
                    .unwrap_or(Price::ZERO)
            }
            Self::Amount(amount) => amount,
            Self::FreeDrink => items
                .iter()
                .map(|item| item.unit_price)
                .min()
                .unwrap_or(Price::ZERO),
        };
        off.min(subtotal)
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Percent(percent) => format!("{percent}% off"),
            Self::Amount(amount) => format!("{amount} off"),
            Self::FreeDrink => "Free drink".to_owned(),
        }
    }
}

/// Money breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub discount: Price,
    pub tax: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Compute the breakdown for `items`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AmountOverflow`] if the subtotal, tax or
    /// total is not representable.
    pub fn compute(
        items: &[LineItem],
        order_type: OrderType,
        discount: Option<&Discount>,
        policy: &CheckoutPolicy,
    ) -> Result<Self, CheckoutError> {
        let subtotal = items
            .iter()
            .try_fold(Price::ZERO, |total, item| {
                total.checked_add(item.checked_line_total()?)
            })
            .ok_or(CheckoutError::AmountOverflow)?;
        let discount = discount.map_or(Price::ZERO, |d| d.amount_off(items));
        let taxable = subtotal.saturating_sub(discount);
        let tax = taxable
            .amount()
            .checked_mul(policy.tax_rate)
            .and_then(|tax| Price::round(round2(tax)).ok())
            .ok_or(CheckoutError::AmountOverflow)?;
        let delivery_fee = match order_type {
            OrderType::Pickup => Price::ZERO,
            OrderType::Delivery => policy.delivery_fee,
        };
        let total = taxable
            .checked_add(tax)
            .and_then(|total| total.checked_add(delivery_fee))
            .ok_or(CheckoutError::AmountOverflow)?;

        Ok(Self {
            subtotal,
            discount,
            tax,
            delivery_fee,
            total,
        })
    }
}

/// Customer choices made at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRequest {
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub discount: Option<Discount>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<LineItem>,
    pub summary: OrderSummary,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_ready_at: DateTime<Utc>,
}

/// Receives placed orders.
pub trait OrderSubmitter {
    /// Record or forward `order`.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError` if the order was not accepted.
    fn submit(&self, order: &Order) -> Result<(), SubmitError>;
}

/// Build an order from the cart, submit it, and clear the cart once the
/// submission succeeds.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart,
/// [`CheckoutError::AmountOverflow`] if the order total is not
/// representable, and [`CheckoutError::Submit`] if the submitter fails. The
/// cart is unchanged in every case.
pub fn place_order(
    cart: &Cart,
    request: OrderRequest,
    policy: &CheckoutPolicy,
    submitter: &dyn OrderSubmitter,
    now: DateTime<Utc>,
) -> Result<Order, CheckoutError> {
    let items = cart.items();
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let summary = OrderSummary::compute(
        &items,
        request.order_type,
        request.discount.as_ref(),
        policy,
    )?;
    let special_instructions = request
        .special_instructions
        .map(|note| note.trim().to_owned())
        .filter(|note| !note.is_empty());

    let order = Order {
        id: OrderId::generate(),
        items,
        summary,
        order_type: request.order_type,
        payment_method: request.payment_method,
        special_instructions,
        discount: request.discount,
        status: OrderStatus::Pending,
        created_at: now,
        estimated_ready_at: now + Duration::minutes(READY_ESTIMATE_MINUTES),
    };

    if let Err(e) = submitter.submit(&order) {
        warn!(order_id = %order.id, error = %e, "Order submission failed, cart kept");
        return Err(e.into());
    }

    info!(
        order_id = %order.id,
        total = %order.summary.total,
        order_type = %order.order_type,
        "Order placed"
    );
    cart.clear();
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::cart::{MemoryStore, NoopObserver};
    use crate::types::{OptionSet, Size};

    #[derive(Default)]
    struct RecordingSubmitter {
        orders: Mutex<Vec<Order>>,
    }

    impl OrderSubmitter for RecordingSubmitter {
        fn submit(&self, order: &Order) -> Result<(), SubmitError> {
            self.orders.lock().unwrap().push(order.clone());
            Ok(())
        }
    }

    struct RejectingSubmitter;

    impl OrderSubmitter for RejectingSubmitter {
        fn submit(&self, _order: &Order) -> Result<(), SubmitError> {
            Err(SubmitError::Rejected("payment declined".to_owned()))
        }
    }

    fn line(cents: u32, quantity: u32) -> LineItem {
        LineItem::priced(
            format!("p{cents}"),
            "Drink",
            Price::from_cents(cents),
            quantity,
            Size::Medium,
            OptionSet::new(),
        )
    }

    fn cart_with(items: Vec<LineItem>) -> Cart {
        let cart = Cart::new(Arc::new(MemoryStore::new()), Arc::new(NoopObserver));
        for item in items {
            cart.add_item(item).unwrap();
        }
        cart
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    // =========================================================================
    // Summary
    // =========================================================================

    #[test]
    fn test_pickup_summary() {
        let items = vec![line(450, 2), line(299, 1)];
        let summary =
            OrderSummary::compute(&items, OrderType::Pickup, None, &CheckoutPolicy::default())
                .unwrap();

        assert_eq!(summary.subtotal, Price::from_cents(1_199));
        // 11.99 × 0.08 = 0.9592
        assert_eq!(summary.tax, Price::from_cents(96));
        assert_eq!(summary.delivery_fee, Price::ZERO);
        assert_eq!(summary.total, Price::from_cents(1_295));
    }

    #[test]
    fn test_delivery_adds_fee() {
        let items = vec![line(1_000, 1)];
        let summary =
            OrderSummary::compute(&items, OrderType::Delivery, None, &CheckoutPolicy::default())
                .unwrap();

        assert_eq!(summary.tax, Price::from_cents(80));
        assert_eq!(summary.delivery_fee, Price::from_cents(299));
        assert_eq!(summary.total, Price::from_cents(1_379));
    }

    #[test]
    fn test_percent_discount_before_tax() {
        let items = vec![line(1_000, 1)];
        let summary = OrderSummary::compute(
            &items,
            OrderType::Pickup,
            Some(&Discount::Percent(20)),
            &CheckoutPolicy::default(),
        )
        .unwrap();

        assert_eq!(summary.discount, Price::from_cents(200));
        assert_eq!(summary.tax, Price::from_cents(64));
        assert_eq!(summary.total, Price::from_cents(864));
    }

    #[test]
    fn test_amount_discount_capped_at_subtotal() {
        let items = vec![line(320, 1)];
        let summary = OrderSummary::compute(
            &items,
            OrderType::Delivery,
            Some(&Discount::Amount(Price::from_cents(500))),
            &CheckoutPolicy::default(),
        )
        .unwrap();

        assert_eq!(summary.discount, Price::from_cents(320));
        assert_eq!(summary.tax, Price::ZERO);
        assert_eq!(summary.total, Price::from_cents(299));
    }

    #[test]
    fn test_free_drink_takes_cheapest_unit() {
        let items = vec![line(550, 2), line(299, 3)];
        assert_eq!(
            Discount::FreeDrink.amount_off(&items),
            Price::from_cents(299)
        );
    }

    fn expensive(quantity: u32) -> LineItem {
        let unit = Price::new(Decimal::from_i128_with_scale(10_i128.pow(24), 0)).unwrap();
        LineItem::priced("9", "Gold Latte", unit, quantity, Size::Medium, OptionSet::new())
    }

    #[test]
    fn test_overflowing_subtotal_is_error() {
        let items = vec![expensive(u32::MAX), line(450, 1)];
        let result = OrderSummary::compute(
            &items,
            OrderType::Delivery,
            Some(&Discount::Percent(20)),
            &CheckoutPolicy::default(),
        );
        assert!(matches!(result, Err(CheckoutError::AmountOverflow)));
    }

    #[test]
    fn test_large_amounts_still_compute() {
        let item = expensive(1);
        let unit = item.unit_price;
        let items = vec![item];

        assert_eq!(
            Discount::Percent(50).amount_off(&items).amount(),
            unit.amount() / Decimal::TWO
        );
        let summary =
            OrderSummary::compute(&items, OrderType::Pickup, None, &CheckoutPolicy::default())
                .unwrap();
        assert_eq!(summary.subtotal, unit);
        assert!(summary.total > unit);
    }

    #[test]
    fn test_policy_rejects_bad_tax_rate() {
        assert!(matches!(
            CheckoutPolicy::new(Decimal::new(15, 1), Price::ZERO),
            Err(CheckoutError::InvalidTaxRate(_))
        ));
        assert!(CheckoutPolicy::new(Decimal::new(10, 2), Price::ZERO).is_ok());
    }

    // =========================================================================
    // place_order
    // =========================================================================

    #[test]
    fn test_place_order_clears_cart() {
        let cart = cart_with(vec![line(450, 2)]);
        let submitter = RecordingSubmitter::default();
        let request = OrderRequest {
            order_type: OrderType::Delivery,
            special_instructions: Some("  extra hot  ".to_owned()),
            ..OrderRequest::default()
        };

        let order = place_order(
            &cart,
            request,
            &CheckoutPolicy::default(),
            &submitter,
            now(),
        )
        .unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.special_instructions.as_deref(), Some("extra hot"));
        assert_eq!(
            order.estimated_ready_at - order.created_at,
            Duration::minutes(30)
        );
        assert_eq!(submitter.orders.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_place_order_empty_cart() {
        let cart = cart_with(Vec::new());
        let result = place_order(
            &cart,
            OrderRequest::default(),
            &CheckoutPolicy::default(),
            &RecordingSubmitter::default(),
            now(),
        );
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn test_failed_submission_keeps_cart() {
        let cart = cart_with(vec![line(450, 2)]);
        let result = place_order(
            &cart,
            OrderRequest::default(),
            &CheckoutPolicy::default(),
            &RejectingSubmitter,
            now(),
        );

        assert!(matches!(result, Err(CheckoutError::Submit(_))));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_blank_instructions_dropped() {
        let cart = cart_with(vec![line(450, 1)]);
        let request = OrderRequest {
            special_instructions: Some("   ".to_owned()),
            ..OrderRequest::default()
        };
        let order = place_order(
            &cart,
            request,
            &CheckoutPolicy::default(),
            &RecordingSubmitter::default(),
            now(),
        )
        .unwrap();
        assert!(order.special_instructions.is_none());
    }
}
