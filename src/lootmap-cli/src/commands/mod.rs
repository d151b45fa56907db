//! Command handlers for lootmap CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod bundle;
pub mod configure;
pub mod extract;
pub mod icons;
pub mod lookup;
