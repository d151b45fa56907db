//! Extract command - builds the consolidated chest report

use anyhow::{Context, Result};
use lootmap::{build_report, ExtractStats};
use std::path::Path;

/// Build the report from the two asset folders and write it to `output`
///
/// Nothing is written when either folder is missing.
pub fn handle(loot_table_dir: &Path, prefab_dir: &Path, output: &Path) -> Result<()> {
    println!("Looking for: {} and {}", loot_table_dir.display(), prefab_dir.display());
    println!();

    let extraction = build_report(loot_table_dir, prefab_dir)?;

    print_stats(&extraction.stats);

    println!("Writing to {}...", output.display());
    extraction
        .report
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!();
    println!("Generated {}", output.display());
    println!("  - {} structures", extraction.stats.prefabs_with_chests);
    println!("  - {} loot tables", extraction.stats.tables_used);

    Ok(())
}

fn print_stats(stats: &ExtractStats) {
    println!("Loaded {} loot tables", stats.tables_loaded);
    if stats.tables_failed > 0 {
        println!("  ({} loot table files could not be loaded)", stats.tables_failed);
    }

    println!(
        "Scanned {} prefab files: {} with chests, {} chests total",
        stats.prefab_files_scanned, stats.prefabs_with_chests, stats.chests
    );
    if stats.prefab_files_unreadable > 0 {
        println!("  ({} prefab files could not be parsed)", stats.prefab_files_unreadable);
    }

    if !stats.unresolved_ids.is_empty() {
        println!(
            "{} referenced loot tables have no definition:",
            stats.unresolved_ids.len()
        );
        for id in &stats.unresolved_ids {
            println!("  {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dirs_write_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.json");

        let result = handle(&dir.path().join("Drops"), &dir.path().join("Prefabs"), &output);

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_writes_report() {
        let dir = TempDir::new().unwrap();
        let drops = dir.path().join("Drops");
        let prefabs = dir.path().join("Prefabs");
        std::fs::create_dir_all(&drops).unwrap();
        std::fs::create_dir_all(&prefabs).unwrap();
        std::fs::write(drops.join("Tier1.json"), r#"{"Container": {}}"#).unwrap();
        std::fs::write(
            prefabs.join("Hut.json"),
            r#"{"blocks": [{"x": 1, "y": 2, "z": 3, "name": "Block_Spawner_Block",
                "components": {"Components": {"BlockSpawner": {"BlockSpawnerId": "Tier1"}}}}]}"#,
        )
        .unwrap();
        let output = dir.path().join("out").join("report.json");

        handle(&drops, &prefabs, &output).unwrap();

        let report = lootmap::ConsolidatedReport::load(&output).unwrap();
        assert_eq!(report.prefabs.len(), 1);
        assert!(report.loot_table_definitions.contains_key("Tier1"));
    }
}
