//! Configuration command handlers
//!
//! Handles the `configure` subcommand for inspecting and creating the
//! config file.

use crate::config::Config;
use anyhow::{bail, Result};
use std::path::Path;

/// Handle the configure command
///
/// # Arguments
/// * `path` - Explicit config path, or the default location
/// * `show` - If true, show current configuration
/// * `init` - If true, write a config populated with defaults
/// * `force` - Allow `init` to overwrite an existing file
#[allow(clippy::fn_params_excessive_bools)]
pub fn handle(path: Option<&Path>, show: bool, init: bool, force: bool) -> Result<()> {
    let config_path = Config::path_or_default(path)?;

    if init {
        if config_path.exists() && !force {
            bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }
        Config::default().save(&config_path)?;
        println!("Config written to: {}", config_path.display());
        return Ok(());
    }

    if show {
        let config = Config::load(Some(config_path.as_path()))?;
        show_config(&config, &config_path)?;
        return Ok(());
    }

    show_usage();
    Ok(())
}

/// Display current configuration
fn show_config(config: &Config, path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: {} (not created, showing defaults)", path.display());
    }
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: lootmap configure --show");
    println!("       lootmap configure --init [--force]");
}
