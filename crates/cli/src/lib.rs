//! Brew Buddy CLI - order drinks and manage the menu from a terminal.
//!
//! The binary (`bb-cli`) is a thin clap front end over this library; every
//! command lives in [`commands`] so it can be driven from tests.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven settings
//! - [`store`] - JSON/YAML files for the cart, profile, orders and catalog
//! - [`commands`] - Menu, cart, checkout, profile and admin commands
//! - [`error`] - The CLI error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod error;
pub mod store;

pub use commands::Session;
pub use config::CliConfig;
pub use error::CliError;
