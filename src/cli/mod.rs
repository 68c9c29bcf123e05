//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes argument parsing (help and version only), interactive configuration,
//! console rendering and prompts, and the menu workflow state machine.

mod args;
mod config;
mod console;
mod workflow;

pub use args::*;
pub use config::*;
pub use console::*;
pub use workflow::*;
