//! Pricing rule for a configured drink.
//!
//! A unit price is the product's base price scaled by the size multiplier,
//! plus a flat surcharge for every selected add-on, rounded half-up to cents:
//!
//! ```text
//! unit = round2(base × multiplier(size) + 0.50 × |options|)
//! ```
//!
//! ```rust
//! use brew_buddy_core::{OptionSet, Size, pricing};
//! use rust_decimal::Decimal;
//!
//! let options: OptionSet = ["Extra shot"].into_iter().collect();
//! let unit = pricing::price(Decimal::new(400, 2), Size::Large, &options).unwrap();
//! assert_eq!(unit.to_string(), "$5.30");
//! ```

use rust_decimal::Decimal;

use crate::types::{InvalidSize, OptionSet, Price, Size};

/// Surcharge added for each selected option.
pub const OPTION_SURCHARGE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Add-on labels offered for every drink on the menu.
pub const DRINK_OPTIONS: [&str; 6] = [
    "Extra shot",
    "Whipped cream",
    "Caramel drizzle",
    "Sugar-free",
    "Almond milk",
    "Vanilla syrup",
];

/// Errors raised by the pricing rule.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The size is not one of small, medium or large.
    #[error("invalid size: {0:?}")]
    InvalidSize(String),
    /// The base price is negative.
    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),
    /// The unit price is too large to represent.
    #[error("price overflow for base price {0}")]
    Overflow(Decimal),
}

impl From<InvalidSize> for PricingError {
    fn from(err: InvalidSize) -> Self {
        Self::InvalidSize(err.0)
    }
}

/// Price one unit of a product at the given size with the given options.
///
/// # Errors
///
/// Returns [`PricingError::InvalidPrice`] if `base_price` is negative and
/// [`PricingError::Overflow`] if the result is not representable.
pub fn price(base_price: Decimal, size: Size, options: &OptionSet) -> Result<Price, PricingError> {
    if base_price.is_sign_negative() && !base_price.is_zero() {
        return Err(PricingError::InvalidPrice(base_price));
    }

    let raw = OPTION_SURCHARGE
        .checked_mul(Decimal::from(options.len()))
        .zip(base_price.checked_mul(size.multiplier()))
        .and_then(|(surcharge, sized)| sized.checked_add(surcharge))
        .ok_or(PricingError::Overflow(base_price))?;

    Price::round(raw).map_err(|_| PricingError::InvalidPrice(raw))
}

/// Price one unit when the size arrives as caller-supplied text.
///
/// A missing size means medium. A size outside small/medium/large is
/// rejected instead of being defaulted.
///
/// # Errors
///
/// Returns [`PricingError::InvalidSize`] for an unknown size and
/// [`PricingError::InvalidPrice`] for a negative base price.
pub fn price_for(
    base_price: Decimal,
    size: Option<&str>,
    options: &OptionSet,
) -> Result<Price, PricingError> {
    let size = size.map_or(Ok(Size::default()), str::parse::<Size>)?;
    price(base_price, size, options)
}

/// Price of a size with no options, as listed on the menu.
///
/// # Errors
///
/// Returns [`PricingError::InvalidPrice`] if `base_price` is negative.
pub fn size_price(base_price: Decimal, size: Size) -> Result<Price, PricingError> {
    price(base_price, size, &OptionSet::new())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn options(labels: &[&str]) -> OptionSet {
        labels.iter().collect()
    }

    fn dollars(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_small_no_options() {
        let unit = price(dollars(400), Size::Small, &OptionSet::new()).unwrap();
        assert_eq!(unit.amount(), dollars(320));
    }

    #[test]
    fn test_large_one_option() {
        let unit = price(dollars(400), Size::Large, &options(&["Extra shot"])).unwrap();
        assert_eq!(unit.amount(), dollars(530));
    }

    #[test]
    fn test_medium_two_options() {
        let unit = price(dollars(400), Size::Medium, &options(&["a", "b"])).unwrap();
        assert_eq!(unit.amount(), dollars(500));
    }

    #[test]
    fn test_rounds_half_up() {
        // 2.99 × 0.8 = 2.392, 2.99 × 1.2 = 3.588
        assert_eq!(
            size_price(dollars(299), Size::Small).unwrap().amount(),
            dollars(239)
        );
        assert_eq!(
            size_price(dollars(299), Size::Large).unwrap().amount(),
            dollars(359)
        );
        // 3.125 is exactly halfway
        assert_eq!(
            price(Decimal::new(3_125, 3), Size::Medium, &OptionSet::new())
                .unwrap()
                .amount(),
            dollars(313)
        );
    }

    #[test]
    fn test_zero_base_price() {
        let unit = price(Decimal::ZERO, Size::Large, &options(&["Sugar-free"])).unwrap();
        assert_eq!(unit.amount(), dollars(50));
    }

    #[test]
    fn test_rejects_negative_base() {
        assert!(matches!(
            price(dollars(-100), Size::Medium, &OptionSet::new()),
            Err(PricingError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_overflowing_base_is_error() {
        assert_eq!(
            price(Decimal::MAX, Size::Large, &OptionSet::new()),
            Err(PricingError::Overflow(Decimal::MAX))
        );
    }

    #[test]
    fn test_missing_size_defaults_to_medium() {
        let unit = price_for(dollars(450), None, &OptionSet::new()).unwrap();
        assert_eq!(unit.amount(), dollars(450));
    }

    #[test]
    fn test_unknown_size_rejected() {
        assert_eq!(
            price_for(dollars(450), Some("venti"), &OptionSet::new()),
            Err(PricingError::InvalidSize("venti".to_owned()))
        );
    }

    #[test]
    fn test_duplicate_options_charged_once() {
        let unit = price(
            dollars(400),
            Size::Medium,
            &options(&["Extra shot", "Extra shot"]),
        )
        .unwrap();
        assert_eq!(unit.amount(), dollars(450));
    }
}
