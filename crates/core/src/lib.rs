//! Brew Buddy Core - cart, pricing and loyalty library.
//!
//! This crate provides the business logic shared by all Brew Buddy front ends:
//! - `cli` - Command-line ordering and catalog management
//! - `integration-tests` - Cross-crate scenarios
//!
//! # Architecture
//!
//! The core crate contains only types, rules and traits - no file access, no
//! network clients. Persistence, order submission and user feedback are
//! injected through the [`CartStore`], [`OrderSubmitter`] and
//! [`CartObserver`] traits.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, sizes and option sets
//! - [`pricing`] - Unit price of a configured drink
//! - [`cart`] - The cart engine and its persistence/notification boundaries
//! - [`checkout`] - Tax, delivery, discounts and order placement
//! - [`loyalty`] - Points, tiers, rewards and QR promo codes
//! - [`catalog`] - Menu products and admin edits

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod loyalty;
pub mod pricing;
pub mod types;

pub use cart::{
    Cart, CartError, CartEvent, CartObserver, CartStore, LineItem, MemoryStore, NoopObserver,
    StoreError, TracingObserver,
};
pub use catalog::{Catalog, CatalogError, Category, NewProduct, Product};
pub use checkout::{
    CheckoutError, CheckoutPolicy, Discount, Order, OrderRequest, OrderSubmitter, OrderSummary,
    SubmitError, place_order,
};
pub use loyalty::{LoyaltyError, LoyaltyProfile, RedeemCode, Redemption, Reward, Tier};
pub use pricing::PricingError;
pub use types::*;
