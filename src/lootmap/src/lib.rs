//! Chest loot extraction and item icon resolution for game asset dumps
//!
//! Two independent pipelines share this crate:
//!
//! ## Structure/chest extraction
//!
//! Walks a directory of prefab definitions, collects every spawner block
//! that references a loot table, and joins the placements with the loot
//! table definitions they actually use:
//!
//! ```text
//! Drops/Prefabs/**/*.json ─┐
//!                          ├─> ConsolidatedReport (mapped_prefabs_data.json)
//! Prefabs/**/*.json ───────┘
//! ```
//!
//! ## Icon resolution
//!
//! Reads the consolidated report, collects every `ItemId` found at any
//! depth, and reconciles each against the icon file names through an
//! ordered fallback chain (exact, alias, suffix strip, fuzzy). The result
//! is rendered as a static lookup table plus a `getIconPath` accessor.

pub mod bundle;
pub mod document;
pub mod extract;
pub mod files;
pub mod icons;
pub mod mapping;
pub mod report;
pub mod resolve;
pub mod similarity;

pub use bundle::{render_data_js, DEFAULT_BUNDLE_FILE};
pub use document::{collect_strings_for_key, walk, Visitor};
pub use extract::{
    build_report, load_loot_tables, scan_prefabs, ExtractStats, Extraction, LootTables,
    PrefabScan, DEFAULT_LOOT_TABLE_DIR, DEFAULT_PREFAB_DIR, DEFAULT_REPORT_FILE,
};
pub use icons::{IconCatalog, DEFAULT_ICON_DIR, DEFAULT_ICON_EXTENSION};
pub use mapping::{IconMappings, DEFAULT_MAPPINGS_FILE};
pub use report::{ChestEntry, ConsolidatedReport, Location, PrefabRecord};
pub use resolve::{
    Alias, AliasTable, Hit, Resolution, ResolveOutcome, Resolver, ResolverSettings, Rule, Strategy,
    STRATEGIES,
};
pub use similarity::{close_match, ratio};

use std::path::PathBuf;

/// Key under which item identifiers appear in loot table definitions
pub const ITEM_ID_KEY: &str = "ItemId";

/// Errors from extraction and icon resolution
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{} not found\n{hint}", .path.display())]
    MissingDirectory { path: PathBuf, hint: String },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid resolver settings: {0}")]
    InvalidSettings(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
