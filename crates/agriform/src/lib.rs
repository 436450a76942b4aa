//! AgriForm CLI library interface
//!
//! This module exposes internal types for testing purposes.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod store;

pub use config::Config;
pub use store::FileSessionStore;
