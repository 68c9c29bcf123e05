//! Provides local persistence of retrieved command lists.
//!
//! Currently this module writes pretty-printed JSON files via the `json` submodule.

mod json;

pub use json::*;
