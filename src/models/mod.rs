//! Defines the data structures and models used throughout the application.
//!
//! Currently these are the command records returned by the Discord API, the command scope,
//! and the tagged outcome of a list request.

mod command;

pub use command::*;
