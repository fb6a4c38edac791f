//! Loyalty points, rewards and QR promo codes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::checkout::Discount;
use crate::types::Price;

/// Errors from loyalty operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LoyaltyError {
    /// A scanned or typed code was blank.
    #[error("code cannot be empty")]
    EmptyCode,

    /// Not enough points for the reward.
    #[error("{needed} points needed, {available} available")]
    InsufficientPoints { needed: u32, available: u32 },

    /// The name does not match a reward.
    #[error("unknown reward: {0}")]
    UnknownReward(String),
}

/// Membership tier, derived from the point balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Minimum points for this tier.
    #[must_use]
    pub const fn threshold(self) -> u32 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 100,
            Self::Gold => 300,
            Self::Platinum => 500,
        }
    }

    #[must_use]
    pub const fn for_points(points: u32) -> Self {
        if points >= Self::Platinum.threshold() {
            Self::Platinum
        } else if points >= Self::Gold.threshold() {
            Self::Gold
        } else if points >= Self::Silver.threshold() {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Platinum),
            Self::Platinum => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bronze => write!(f, "Bronze"),
            Self::Silver => write!(f, "Silver"),
            Self::Gold => write!(f, "Gold"),
            Self::Platinum => write!(f, "Platinum"),
        }
    }
}

/// Something points can be exchanged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    FreeCoffee,
    FreePastry,
    FiveOff,
}

impl Reward {
    /// Every reward, cheapest first.
    pub const ALL: [Self; 3] = [Self::FreePastry, Self::FreeCoffee, Self::FiveOff];

    /// Point cost.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::FreePastry => 150,
            Self::FreeCoffee => 200,
            Self::FiveOff => 300,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FreeCoffee => "Free Coffee",
            Self::FreePastry => "Free Pastry",
            Self::FiveOff => "$5 Off",
        }
    }
}

impl std::str::FromStr for Reward {
    type Err = LoyaltyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "free_coffee" => Ok(Self::FreeCoffee),
            "free_pastry" => Ok(Self::FreePastry),
            "five_off" => Ok(Self::FiveOff),
            _ => Err(LoyaltyError::UnknownReward(s.to_owned())),
        }
    }
}

/// A promo code read from a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemCode {
    /// `REWARD50` and `LOYALTYPOINTS`: bonus points.
    Points(u32),
    /// `FREECOFFEE`: the cheapest drink of the next order is free.
    FreeCoffee,
    /// `DISCOUNT20`: 20% off the next order.
    Discount20,
    /// Any other code. Accepted but grants nothing.
    Other(String),
}

impl RedeemCode {
    /// Parse a scanned code. Codes are trimmed and matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`LoyaltyError::EmptyCode`] for blank input.
    pub fn parse(code: &str) -> Result<Self, LoyaltyError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(LoyaltyError::EmptyCode);
        }
        Ok(match code.to_ascii_uppercase().as_str() {
            "REWARD50" => Self::Points(50),
            "LOYALTYPOINTS" => Self::Points(100),
            "FREECOFFEE" => Self::FreeCoffee,
            "DISCOUNT20" => Self::Discount20,
            _ => Self::Other(code.to_owned()),
        })
    }
}

/// Outcome of redeeming a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub points_awarded: u32,
    pub discount: Option<Discount>,
    pub message: String,
}

/// A customer's loyalty account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyProfile {
    pub points: u32,
    /// Applied to the next order, then consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_discount: Option<Discount>,
    /// Redeemed rewards not yet handed over.
    #[serde(default)]
    pub vouchers: Vec<Reward>,
}

impl LoyaltyProfile {
    #[must_use]
    pub const fn with_points(points: u32) -> Self {
        Self {
            points,
            active_discount: None,
            vouchers: Vec::new(),
        }
    }

    #[must_use]
    pub const fn tier(&self) -> Tier {
        Tier::for_points(self.points)
    }

    /// Points still needed for the next tier; `None` at the top tier.
    #[must_use]
    pub fn points_to_next_tier(&self) -> Option<u32> {
        self.tier()
            .next()
            .map(|next| next.threshold().saturating_sub(self.points))
    }

    /// Points still needed for the cheapest reward not yet affordable.
    #[must_use]
    pub fn next_reward(&self) -> Option<(Reward, u32)> {
        Reward::ALL
            .into_iter()
            .find(|reward| reward.cost() > self.points)
            .map(|reward| (reward, reward.cost() - self.points))
    }

    /// Add points, saturating at the maximum balance.
    pub fn award(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    /// Apply a scanned code.
    ///
    /// # Errors
    ///
    /// Returns [`LoyaltyError::EmptyCode`] for blank input.
    pub fn redeem_code(&mut self, code: &str) -> Result<Redemption, LoyaltyError> {
        let redemption = match RedeemCode::parse(code)? {
            RedeemCode::Points(points) => {
                self.award(points);
                let message = if points == 50 {
                    "You've earned 50 reward points!".to_owned()
                } else {
                    format!("You've earned {points} loyalty points!")
                };
                Redemption {
                    points_awarded: points,
                    discount: None,
                    message,
                }
            }
            RedeemCode::FreeCoffee => {
                self.active_discount = Some(Discount::FreeDrink);
                Redemption {
                    points_awarded: 0,
                    discount: Some(Discount::FreeDrink),
                    message: "You've redeemed a free coffee!".to_owned(),
                }
            }
            RedeemCode::Discount20 => {
                self.active_discount = Some(Discount::Percent(20));
                Redemption {
                    points_awarded: 0,
                    discount: Some(Discount::Percent(20)),
                    message: "You've activated a 20% discount on your next order!".to_owned(),
                }
            }
            RedeemCode::Other(_) => Redemption {
                points_awarded: 0,
                discount: None,
                message: "Code redeemed successfully!".to_owned(),
            },
        };

        tracing::info!(
            points = self.points,
            awarded = redemption.points_awarded,
            "Redeemed code"
        );
        Ok(redemption)
    }

    /// Spend points on a reward.
    ///
    /// `FiveOff` becomes the active discount; other rewards are kept as
    /// vouchers.
    ///
    /// # Errors
    ///
    /// Returns [`LoyaltyError::InsufficientPoints`] if the balance is below
    /// the reward's cost. The balance is unchanged in that case.
    pub fn redeem_reward(&mut self, reward: Reward) -> Result<u32, LoyaltyError> {
        let cost = reward.cost();
        if self.points < cost {
            return Err(LoyaltyError::InsufficientPoints {
                needed: cost,
                available: self.points,
            });
        }

        self.points -= cost;
        match reward {
            Reward::FiveOff => {
                self.active_discount = Some(Discount::Amount(Price::from_cents(500)));
            }
            Reward::FreeCoffee | Reward::FreePastry => self.vouchers.push(reward),
        }
        Ok(self.points)
    }

    /// Take the active discount for an order, leaving none behind.
    pub fn take_discount(&mut self) -> Option<Discount> {
        self.active_discount.take()
    }
}
