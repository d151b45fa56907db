//! CLI definitions shared by the icon commands

use clap::ValueEnum;
use std::path::PathBuf;

/// Format of the generated icon lookup artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Browser script with `ICON_MAPPINGS` and `getIconPath`
    #[default]
    Js,
    /// Plain JSON (readable by `lootmap lookup`)
    Json,
}

impl OutputFormat {
    /// Output path used when none is given
    pub fn default_output(self) -> PathBuf {
        match self {
            OutputFormat::Js => PathBuf::from(lootmap::DEFAULT_MAPPINGS_FILE),
            OutputFormat::Json => PathBuf::from(lootmap::DEFAULT_MAPPINGS_FILE).with_extension("json"),
        }
    }
}
