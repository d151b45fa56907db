//! Lookup command - applies the icon path accessor to item ids

use anyhow::{Context, Result};
use lootmap::IconMappings;
use std::path::Path;

pub fn handle(ids: &[String], mappings_path: &Path) -> Result<()> {
    let mappings = IconMappings::load(mappings_path).with_context(|| {
        format!(
            "Failed to load {} (generate it with `lootmap icons --format json`)",
            mappings_path.display()
        )
    })?;

    for id in ids {
        let mapped = if mappings.mappings.contains_key(id) { "mapped" } else { "default" };
        println!("{:<40} {:<50} {}", id, mappings.icon_path(id), mapped);
    }

    Ok(())
}
