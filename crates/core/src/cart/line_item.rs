//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CartError;
use crate::types::{LineId, OptionSet, Price, ProductId, Size};

/// One configured product in the cart.
///
/// `name` and `image_ref` are snapshots taken when the item was added; they
/// play no part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Row key, stable across merges.
    pub id: LineId,
    pub product_id: ProductId,
    pub name: String,
    /// Price of one unit at the chosen size and options.
    pub unit_price: Price,
    /// Always at least 1 while the row is in a cart.
    pub quantity: u32,
    pub size: Size,
    pub options: OptionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl LineItem {
    /// Create a line item with a fresh row key.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidPrice`] if `unit_price` is negative.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
        size: Size,
        options: OptionSet,
    ) -> Result<Self, CartError> {
        let unit_price = Price::new(unit_price).map_err(|_| CartError::InvalidPrice(unit_price))?;
        Ok(Self::priced(
            product_id, name, unit_price, quantity, size, options,
        ))
    }

    /// Create a line item from an already validated unit price.
    #[must_use]
    pub fn priced(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Price,
        quantity: u32,
        size: Size,
        options: OptionSet,
    ) -> Self {
        Self {
            id: LineId::generate(),
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            size,
            options,
            image_ref: None,
        }
    }

    /// Attach a display image reference.
    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Returns true if `other` is the same product at the same size with the
    /// same set of options, i.e. the two belong in one cart row.
    #[must_use]
    pub fn same_configuration(&self, other: &Self) -> bool {
        self.matches(&other.product_id, other.size, &other.options)
    }

    /// Returns true if this row holds the given configuration.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: Size, options: &OptionSet) -> bool {
        self.product_id == *product_id && self.size == size && self.options == *options
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }

    /// Unit price times quantity, or `None` if it is not representable.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Price> {
        self.unit_price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn latte(options: &[&str], size: Size) -> LineItem {
        LineItem::priced(
            "2",
            "Cappuccino",
            Price::from_cents(450),
            1,
            size,
            options.iter().collect(),
        )
    }

    #[test]
    fn test_same_configuration_ignores_option_order() {
        let a = latte(&["Extra shot", "Almond milk"], Size::Medium);
        let b = latte(&["Almond milk", "Extra shot"], Size::Medium);
        assert!(a.same_configuration(&b));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_different_size_is_different_configuration() {
        let a = latte(&[], Size::Small);
        let b = latte(&[], Size::Large);
        assert!(!a.same_configuration(&b));
    }

    #[test]
    fn test_name_and_price_do_not_affect_identity() {
        let a = latte(&[], Size::Medium);
        let mut b = latte(&[], Size::Medium);
        b.name = "Renamed".to_owned();
        b.unit_price = Price::from_cents(999);
        assert!(a.same_configuration(&b));
    }

    #[test]
    fn test_new_rejects_negative_price() {
        let result = LineItem::new(
            "1",
            "Espresso",
            Decimal::new(-299, 2),
            1,
            Size::Medium,
            OptionSet::new(),
        );
        assert!(matches!(result, Err(CartError::InvalidPrice(_))));
    }

    #[test]
    fn test_line_total() {
        let mut item = latte(&[], Size::Medium);
        item.quantity = 3;
        assert_eq!(item.line_total(), Price::from_cents(1_350));
    }

    #[test]
    fn test_serde_camel_case() {
        let item = latte(&["Extra shot"], Size::Large).with_image("latte.jpg");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], "2");
        assert_eq!(json["unitPrice"], "4.50");
        assert_eq!(json["size"], "large");
        assert_eq!(json["imageRef"], "latte.jpg");
    }
}
