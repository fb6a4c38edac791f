//! Loyalty profile commands.
//!
//! # Usage
//!
//! ```bash
//! bb-cli profile show
//! bb-cli profile scan REWARD50
//! bb-cli profile redeem free-coffee
//! ```

use brew_buddy_core::{LoyaltyProfile, Reward};
use tracing::info;

use super::Session;
use crate::error::CliError;

/// Render points, tier and progress.
#[must_use]
pub fn show(profile: &LoyaltyProfile) -> Vec<String> {
    let mut lines = vec![format!(
        "{} points, {} member",
        profile.points,
        profile.tier()
    )];

    match (profile.tier().next(), profile.points_to_next_tier()) {
        (Some(next), Some(needed)) => lines.push(format!("{needed} points to {next}")),
        _ => lines.push("Top tier reached".to_owned()),
    }
    if let Some((reward, needed)) = profile.next_reward() {
        lines.push(format!("{needed} points to {}", reward.label()));
    }

    for reward in Reward::ALL {
        let status = if profile.points >= reward.cost() {
            "available"
        } else {
            "locked"
        };
        lines.push(format!("  {} ({} pts) {status}", reward.label(), reward.cost()));
    }

    if let Some(discount) = &profile.active_discount {
        lines.push(format!("Next order: {}", discount.label()));
    }
    if !profile.vouchers.is_empty() {
        let vouchers: Vec<&str> = profile.vouchers.iter().map(|r| r.label()).collect();
        lines.push(format!("Vouchers: {}", vouchers.join(", ")));
    }
    lines
}

/// Redeem a scanned promo code.
///
/// # Errors
///
/// Returns `CliError::Loyalty` for a blank code and `CliError::Store` if the
/// profile cannot be read or written.
pub fn scan(session: &Session, code: &str) -> Result<String, CliError> {
    let mut profile = session.profile_file.load()?;
    let redemption = profile.redeem_code(code)?;
    session.profile_file.save(&profile)?;
    Ok(redemption.message)
}

/// Spend points on a reward.
///
/// # Errors
///
/// Returns `CliError::Loyalty` for an unknown reward or too few points; the
/// profile is not written in that case.
pub fn redeem(session: &Session, reward: &str) -> Result<String, CliError> {
    let reward: Reward = reward.parse()?;
    let mut profile = session.profile_file.load()?;
    let remaining = profile.redeem_reward(reward)?;
    session.profile_file.save(&profile)?;

    info!(reward = reward.label(), remaining, "Redeemed reward");
    Ok(format!(
        "Redeemed {}. {remaining} points left.",
        reward.label()
    ))
}
