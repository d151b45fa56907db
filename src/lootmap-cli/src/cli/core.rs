//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::icons::OutputFormat;

#[derive(Parser)]
#[command(name = "lootmap")]
#[command(about = "Chest loot extractor and item icon mapper", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "LOOTMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log per-file details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the consolidated chest report from loot table and prefab folders
    #[command(visible_alias = "x")]
    Extract {
        /// Loot table folder (Drops/Prefabs from the server assets)
        #[arg(long)]
        loot_tables: Option<PathBuf>,

        /// Prefab folder (Prefabs from the server assets)
        #[arg(long)]
        prefabs: Option<PathBuf>,

        /// Output path for the consolidated report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve every item in a report to an icon file and write the lookup table
    #[command(visible_alias = "i")]
    Icons {
        /// Consolidated report produced by `extract`
        #[arg(long)]
        report: Option<PathBuf>,

        /// Folder of item icon images
        #[arg(long)]
        icons: Option<PathBuf>,

        /// Icon folder as the viewer page sees it [default: ItemsGenerated]
        #[arg(long)]
        icon_prefix: Option<String>,

        /// Output path for the lookup table [default: icon_mappings.js or .json]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Js)]
        format: OutputFormat,

        /// Minimum similarity for fuzzy matches (0.0 - 1.0)
        #[arg(long)]
        cutoff: Option<f64>,

        /// Print how each mapped item was resolved
        #[arg(long)]
        show_rules: bool,
    },

    /// Wrap a report as data.js so the viewer can open it without a server
    #[command(visible_alias = "b")]
    Bundle {
        /// Consolidated report produced by `extract`
        #[arg(long)]
        report: Option<PathBuf>,

        /// Output path for the script
        #[arg(short, long, default_value = lootmap::DEFAULT_BUNDLE_FILE)]
        output: PathBuf,
    },

    /// Print the icon path for item ids using a JSON lookup table
    #[command(visible_alias = "l")]
    Lookup {
        /// Item ids (e.g., "Potion_Health_Lesser")
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,

        /// Lookup table written by `icons --format json`
        #[arg(long, default_value = "icon_mappings.json")]
        mappings: PathBuf,
    },

    /// Show or initialize the configuration file
    #[command(visible_alias = "c")]
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Write a config file populated with the defaults
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file with --init
        #[arg(long)]
        force: bool,
    },
}
