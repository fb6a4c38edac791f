//! Integration tests for loyalty codes and rewards feeding into checkout.

#![allow(clippy::unwrap_used)]

use std::fs;

use brew_buddy_cli::commands::{cart, checkout, profile};
use brew_buddy_cli::{CliConfig, CliError, Session};
use brew_buddy_core::{Discount, LoyaltyError, PaymentMethod, Price, Reward, Tier};
use chrono::Utc;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Session {
    Session::open(CliConfig::with_data_dir(dir.path()), None).unwrap()
}

// ============================================================================
// Discounts at checkout
// ============================================================================

#[test]
fn test_discount20_applies_once() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    assert_eq!(
        profile::scan(&session, " discount20 ").unwrap(),
        "You've activated a 20% discount on your next order!"
    );
    cart::add(&session.cart, &session.catalog, "2", None, &[], 2).unwrap();

    let first = checkout::run(&session, false, PaymentMethod::Credit, None, Utc::now()).unwrap();

    // 9.00 − 1.80 = 7.20; tax 0.576 → 0.58
    assert_eq!(first.discount, Some(Discount::Percent(20)));
    assert_eq!(first.summary.discount, Price::from_cents(180));
    assert_eq!(first.summary.tax, Price::from_cents(58));
    assert_eq!(first.summary.total, Price::from_cents(778));

    cart::add(&session.cart, &session.catalog, "2", None, &[], 2).unwrap();
    let second = checkout::run(&session, false, PaymentMethod::Credit, None, Utc::now()).unwrap();
    assert_eq!(second.discount, None);
    assert_eq!(second.summary.total, Price::from_cents(972));
}

#[test]
fn test_free_coffee_code_takes_cheapest_drink() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    profile::scan(&session, "FREECOFFEE").unwrap();
    cart::add(&session.cart, &session.catalog, "1", Some("small"), &[], 1).unwrap();
    cart::add(&session.cart, &session.catalog, "8", None, &[], 1).unwrap();

    let order = checkout::run(&session, false, PaymentMethod::Mobile, None, Utc::now()).unwrap();

    // small espresso 2.39 is free
    assert_eq!(order.summary.discount, Price::from_cents(239));
    assert_eq!(order.summary.subtotal, Price::from_cents(989));
}

#[test]
fn test_five_off_never_exceeds_subtotal() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    for _ in 0..3 {
        profile::scan(&session, "LOYALTYPOINTS").unwrap();
    }
    profile::redeem(&session, "five-off").unwrap();
    cart::add(&session.cart, &session.catalog, "1", Some("small"), &[], 1).unwrap();

    let order = checkout::run(&session, true, PaymentMethod::Credit, None, Utc::now()).unwrap();

    assert_eq!(order.summary.discount, Price::from_cents(239));
    assert_eq!(order.summary.tax, Price::ZERO);
    assert_eq!(order.summary.total, Price::from_cents(299));
}

// ============================================================================
// Points and tiers
// ============================================================================

#[test]
fn test_points_accumulate_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    profile::scan(&open(&dir), "REWARD50").unwrap();
    profile::scan(&open(&dir), "LOYALTYPOINTS").unwrap();
    profile::scan(&open(&dir), "LOYALTYPOINTS").unwrap();
    assert_eq!(
        profile::scan(&open(&dir), "WELCOME").unwrap(),
        "Code redeemed successfully!"
    );

    let loaded = open(&dir).profile_file.load().unwrap();
    assert_eq!(loaded.points, 250);
    assert_eq!(loaded.tier(), Tier::Silver);
    assert_eq!(loaded.points_to_next_tier(), Some(50));

    let lines = profile::show(&loaded);
    assert_eq!(lines.first().unwrap(), "250 points, Silver member");
}

#[test]
fn test_blank_code_and_unknown_reward() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);

    assert!(matches!(
        profile::scan(&session, "   "),
        Err(CliError::Loyalty(LoyaltyError::EmptyCode))
    ));
    assert!(matches!(
        profile::redeem(&session, "free-muffin"),
        Err(CliError::Loyalty(LoyaltyError::UnknownReward(_)))
    ));
    assert!(!dir.path().join("profile.json").exists());
}

#[test]
fn test_vouchers_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    for _ in 0..4 {
        profile::scan(&session, "LOYALTYPOINTS").unwrap();
    }
    profile::redeem(&session, "free_pastry").unwrap();
    profile::redeem(&session, "FREE-COFFEE").unwrap();

    let saved = fs::read_to_string(dir.path().join("profile.json")).unwrap();
    assert!(saved.contains("free_pastry"));

    let loaded = session.profile_file.load().unwrap();
    assert_eq!(loaded.points, 50);
    assert_eq!(loaded.vouchers, vec![Reward::FreePastry, Reward::FreeCoffee]);
    assert_eq!(loaded.active_discount, None);
}
