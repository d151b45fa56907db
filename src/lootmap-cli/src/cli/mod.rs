//! CLI argument definitions for lootmap
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod icons;

pub use core::{Cli, Commands};
pub use icons::OutputFormat;
