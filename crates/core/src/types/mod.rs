//! Core types for Brew Buddy.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod options;
pub mod price;
pub mod size;
pub mod status;

pub use id::*;
pub use options::OptionSet;
pub use price::{Price, PriceError, round2};
pub use size::{InvalidSize, Size};
pub use status::*;
