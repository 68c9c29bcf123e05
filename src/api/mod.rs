//! Provides clients and utilities for interacting with external APIs.
//!
//! Includes:
//! - `discord`: Client for the application commands endpoints of the Discord REST API.

mod discord;
mod discord_test;

pub use discord::*;
