//! Integration tests for Brew Buddy.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p brew-buddy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state surviving a restart through the JSON store
//! - `ordering` - Menu to cart to checkout through a CLI session
//! - `loyalty_checkout` - Promo codes and rewards applied to orders
//!
//! Every test works in its own temporary data directory.
