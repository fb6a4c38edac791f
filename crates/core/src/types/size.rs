//! Drink size.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known [`Size`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid size: {0:?} (expected small, medium or large)")]
pub struct InvalidSize(pub String);

/// Cup size of a drink.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    /// All sizes, smallest first.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Multiplier applied to a product's base price.
    #[must_use]
    pub const fn multiplier(self) -> Decimal {
        match self {
            Self::Small => Decimal::from_parts(8, 0, 0, false, 1),
            Self::Medium => Decimal::ONE,
            Self::Large => Decimal::from_parts(12, 0, 0, false, 1),
        }
    }

    /// Lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Capitalized name for display ("Small", "Medium", "Large").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Size {
    type Err = InvalidSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(InvalidSize(s.to_owned())),
        }
    }
}
