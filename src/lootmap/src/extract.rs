//! Chest extraction from prefab and loot table directories
//!
//! Loot tables are loaded verbatim and indexed by file stem. Prefabs are
//! scanned for spawner blocks; each spawner with a loot table id becomes a
//! chest entry. The final report keeps only the loot tables some chest
//! actually uses.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::files::{collect_files_with_extension, file_name, file_stem, relative_parts};
use crate::report::{ChestEntry, ConsolidatedReport, Location, PrefabRecord};
use crate::{Error, Result};

/// Default loot table directory, relative to the working directory
pub const DEFAULT_LOOT_TABLE_DIR: &str = "Drops/Prefabs";

/// Default prefab directory, relative to the working directory
pub const DEFAULT_PREFAB_DIR: &str = "Prefabs";

/// Default output file for the consolidated report
pub const DEFAULT_REPORT_FILE: &str = "mapped_prefabs_data.json";

/// Block type tag of a loot spawner
pub const SPAWNER_BLOCK: &str = "Block_Spawner_Block";

const DOCUMENT_EXTENSIONS: &[&str] = &["json"];

fn missing_dir_hint(folder: &str) -> String {
    format!("Extract '{folder}' from Install/package/latest/Assets.zip > Assets/Server/")
}

fn ensure_dir(path: &Path, folder: &str) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::MissingDirectory {
            path: path.to_path_buf(),
            hint: missing_dir_hint(folder),
        })
    }
}

/// All loot table definitions found under a directory
#[derive(Debug, Default)]
pub struct LootTables {
    /// Table id (file stem) → parsed definition
    pub tables: BTreeMap<String, Value>,
    /// Files that could not be read or parsed, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl LootTables {
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.tables.get(id)
    }
}

fn read_json(path: &Path) -> std::result::Result<Value, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

/// Load every `*.json` file under `dir`, keyed by file stem
///
/// A file that fails to load is logged and recorded in
/// [`LootTables::failed`]; the rest are still loaded. When two files share a
/// stem the later one (in path order) wins.
pub fn load_loot_tables<P: AsRef<Path>>(dir: P) -> Result<LootTables> {
    let dir = dir.as_ref();
    ensure_dir(dir, "Drops/Prefabs")?;

    let mut loot = LootTables::default();
    for path in collect_files_with_extension(dir, DOCUMENT_EXTENSIONS) {
        match read_json(&path) {
            Ok(value) => {
                loot.tables.insert(file_stem(&path), value);
            }
            Err(e) => {
                tracing::warn!("Error loading {}: {}", file_name(&path), e);
                loot.failed.push((path, e));
            }
        }
    }

    tracing::debug!(
        "Loaded {} loot tables from {} ({} failed)",
        loot.tables.len(),
        dir.display(),
        loot.failed.len()
    );
    Ok(loot)
}

/// Result of scanning a prefab directory
#[derive(Debug, Default)]
pub struct PrefabScan {
    /// Prefabs with at least one chest, in path order
    pub prefabs: Vec<PrefabRecord>,
    /// Every loot table id referenced by a chest
    pub used_ids: BTreeSet<String>,
    /// Number of prefab documents examined
    pub files_scanned: usize,
    /// Number of prefab documents that could not be read or parsed
    pub files_unreadable: usize,
}

/// Loot table id configured on a spawner block
///
/// Lives at `components.Components.BlockSpawner.BlockSpawnerId`; empty
/// strings count as absent.
fn spawner_table_id(block: &Value) -> Option<&str> {
    block
        .get("components")?
        .get("Components")?
        .get("BlockSpawner")?
        .get("BlockSpawnerId")?
        .as_str()
        .filter(|id| !id.is_empty())
}

fn block_location(block: &Value) -> Option<Location> {
    Some(Location {
        x: block.get("x")?.as_i64()?,
        y: block.get("y")?.as_i64()?,
        z: block.get("z")?.as_i64()?,
    })
}

fn is_spawner(block: &Value) -> bool {
    block.get("name").and_then(Value::as_str) == Some(SPAWNER_BLOCK)
}

/// Extract chest entries from one parsed prefab document
///
/// Returns `None` when the document has no `blocks` array.
pub fn chests_in_prefab(doc: &Value) -> Option<Vec<ChestEntry>> {
    let blocks = doc.get("blocks")?.as_array()?;

    let chests = blocks
        .iter()
        .filter(|block| is_spawner(block))
        .filter_map(|block| {
            let table_id = spawner_table_id(block)?;
            match block_location(block) {
                Some(location) => Some(ChestEntry {
                    location,
                    loot_table_id: table_id.to_string(),
                }),
                None => {
                    tracing::warn!("Spawner block for {} has no integer coordinates", table_id);
                    None
                }
            }
        })
        .collect();

    Some(chests)
}

/// Scan every `*.json` prefab under `dir` for spawner blocks
///
/// Unparseable files and files without a block list are skipped. Prefabs
/// that end up with no chests are not included.
pub fn scan_prefabs<P: AsRef<Path>>(dir: P) -> Result<PrefabScan> {
    let dir = dir.as_ref();
    ensure_dir(dir, "Prefabs")?;

    let mut scan = PrefabScan::default();
    for path in collect_files_with_extension(dir, DOCUMENT_EXTENSIONS) {
        scan.files_scanned += 1;

        let doc = match read_json(&path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
                scan.files_unreadable += 1;
                continue;
            }
        };

        let Some(chests) = chests_in_prefab(&doc) else {
            continue;
        };
        if chests.is_empty() {
            continue;
        }

        let (structure, rel) = relative_parts(dir, &path);
        let mut record = PrefabRecord::new(structure, file_name(&path), rel);
        for chest in chests {
            scan.used_ids.insert(chest.loot_table_id.clone());
            record.push_chest(chest);
        }
        scan.prefabs.push(record);
    }

    Ok(scan)
}

/// Counts gathered while building a report
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    pub tables_loaded: usize,
    pub tables_failed: usize,
    pub prefab_files_scanned: usize,
    pub prefab_files_unreadable: usize,
    pub prefabs_with_chests: usize,
    pub chests: usize,
    pub tables_used: usize,
    /// Referenced ids with no loaded definition
    pub unresolved_ids: Vec<String>,
}

/// A built report plus the statistics describing it
#[derive(Debug)]
pub struct Extraction {
    pub report: ConsolidatedReport,
    pub stats: ExtractStats,
}

/// Keep only the definitions referenced by `used_ids`
pub fn filter_definitions(
    tables: &BTreeMap<String, Value>,
    used_ids: &BTreeSet<String>,
) -> BTreeMap<String, Value> {
    used_ids
        .iter()
        .filter_map(|id| tables.get(id).map(|v| (id.clone(), v.clone())))
        .collect()
}

/// Build the consolidated report from the two input directories
///
/// Both directories are checked before anything is read, so a missing
/// directory never yields partial output.
pub fn build_report<P: AsRef<Path>, Q: AsRef<Path>>(
    loot_table_dir: P,
    prefab_dir: Q,
) -> Result<Extraction> {
    let loot_table_dir = loot_table_dir.as_ref();
    let prefab_dir = prefab_dir.as_ref();
    ensure_dir(loot_table_dir, "Drops/Prefabs")?;
    ensure_dir(prefab_dir, "Prefabs")?;

    let loot = load_loot_tables(loot_table_dir)?;
    let scan = scan_prefabs(prefab_dir)?;

    let loot_table_definitions = filter_definitions(&loot.tables, &scan.used_ids);
    let unresolved_ids = scan
        .used_ids
        .iter()
        .filter(|id| !loot.tables.contains_key(*id))
        .cloned()
        .collect();

    let report = ConsolidatedReport {
        loot_table_definitions,
        prefabs: scan.prefabs,
    };

    let stats = ExtractStats {
        tables_loaded: loot.len(),
        tables_failed: loot.failed.len(),
        prefab_files_scanned: scan.files_scanned,
        prefab_files_unreadable: scan.files_unreadable,
        prefabs_with_chests: report.prefabs.len(),
        chests: report.total_chests(),
        tables_used: report.loot_table_definitions.len(),
        unresolved_ids,
    };

    Ok(Extraction { report, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn spawner(x: i64, y: i64, z: i64, id: &str) -> Value {
        json!({
            "x": x, "y": y, "z": z,
            "name": SPAWNER_BLOCK,
            "components": {"Components": {"BlockSpawner": {"BlockSpawnerId": id}}}
        })
    }

    fn write_json(path: &Path, value: &Value) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
    }

    #[test]
    fn test_chests_in_prefab() {
        let doc = json!({
            "blocks": [
                {"x": 0, "y": 0, "z": 0, "name": "Rock_Stone"},
                spawner(1, 2, 3, "Tier1"),
                spawner(4, 5, 6, ""),
                {"x": 7, "y": 8, "z": 9, "name": SPAWNER_BLOCK, "components": {}},
                spawner(10, 11, 12, "Tier2"),
            ]
        });

        let chests = chests_in_prefab(&doc).unwrap();
        assert_eq!(chests.len(), 2);
        assert_eq!(chests[0].location, Location { x: 1, y: 2, z: 3 });
        assert_eq!(chests[0].loot_table_id, "Tier1");
        assert_eq!(chests[1].loot_table_id, "Tier2");
    }

    #[test]
    fn test_chests_in_prefab_without_blocks() {
        assert!(chests_in_prefab(&json!({"entities": []})).is_none());
        assert!(chests_in_prefab(&json!({"blocks": {"x": 1}})).is_none());
        assert_eq!(chests_in_prefab(&json!({"blocks": []})), Some(vec![]));
    }

    #[test]
    fn test_spawner_without_coordinates_is_skipped() {
        let doc = json!({
            "blocks": [{
                "name": SPAWNER_BLOCK,
                "components": {"Components": {"BlockSpawner": {"BlockSpawnerId": "Tier1"}}}
            }]
        });
        assert_eq!(chests_in_prefab(&doc), Some(vec![]));
    }

    #[test]
    fn test_load_loot_tables_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        write_json(&dir.path().join("Tier1.json"), &json!({"Container": {}}));
        write_json(&dir.path().join("Nested/Tier2.json"), &json!({"Container": []}));
        std::fs::write(dir.path().join("Broken.json"), "{").unwrap();

        let loot = load_loot_tables(dir.path()).unwrap();
        assert_eq!(loot.len(), 2);
        assert!(loot.get("Tier1").is_some());
        assert!(loot.get("Tier2").is_some());
        assert_eq!(loot.failed.len(), 1);
        assert!(loot.failed[0].0.ends_with("Broken.json"));
    }

    #[test]
    fn test_load_loot_tables_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = load_loot_tables(dir.path().join("Drops")).unwrap_err();
        assert!(matches!(err, Error::MissingDirectory { .. }));
    }

    #[test]
    fn test_scan_prefabs() {
        let dir = TempDir::new().unwrap();
        write_json(
            &dir.path().join("Dungeon/Room_A.json"),
            &json!({"blocks": [spawner(1, 1, 1, "Tier1"), spawner(2, 2, 2, "Tier2")]}),
        );
        write_json(
            &dir.path().join("Dungeon/Room_B.json"),
            &json!({"blocks": [{"x": 0, "y": 0, "z": 0, "name": "Rock_Stone"}]}),
        );
        write_json(&dir.path().join("Tree.json"), &json!({"blocks": [spawner(0, 0, 0, "Tier1")]}));
        write_json(&dir.path().join("NoBlocks.json"), &json!({"anchor": {}}));
        std::fs::write(dir.path().join("Corrupt.json"), "not json").unwrap();

        let scan = scan_prefabs(dir.path()).unwrap();
        assert_eq!(scan.files_scanned, 5);
        assert_eq!(scan.files_unreadable, 1);
        assert_eq!(scan.prefabs.len(), 2);

        let room = &scan.prefabs[0];
        assert_eq!(room.structure_name, "Dungeon");
        assert_eq!(room.prefab_name, "Room_A.json");
        assert_eq!(room.relative_path_from_root, "Dungeon/Room_A.json");
        assert_eq!(room.total_chests, 2);

        let tree = &scan.prefabs[1];
        assert_eq!(tree.structure_name, "Root");
        assert_eq!(tree.total_chests, 1);

        let used: Vec<_> = scan.used_ids.iter().map(String::as_str).collect();
        assert_eq!(used, vec!["Tier1", "Tier2"]);
    }

    #[test]
    fn test_build_report_filters_definitions() {
        let dir = TempDir::new().unwrap();
        let drops = dir.path().join("Drops/Prefabs");
        let prefabs = dir.path().join("Prefabs");

        write_json(&drops.join("Tier1.json"), &json!({"Container": {"Item": {"ItemId": "Rock"}}}));
        write_json(&drops.join("Unused.json"), &json!({"Container": {}}));
        write_json(
            &prefabs.join("Camp/Tent.json"),
            &json!({"blocks": [spawner(3, 4, 5, "Tier1"), spawner(6, 7, 8, "Ghost")]}),
        );

        let Extraction { report, stats } = build_report(&drops, &prefabs).unwrap();

        let ids: Vec<_> = report.loot_table_definitions.keys().cloned().collect();
        assert_eq!(ids, vec!["Tier1"]);
        assert_eq!(report.prefabs[0].chests[1].loot_table_id, "Ghost");

        assert_eq!(stats.tables_loaded, 2);
        assert_eq!(stats.tables_used, 1);
        assert_eq!(stats.chests, 2);
        assert_eq!(stats.unresolved_ids, vec!["Ghost".to_string()]);
    }

    #[test]
    fn test_build_report_missing_prefab_dir_reads_nothing() {
        let dir = TempDir::new().unwrap();
        let drops = dir.path().join("Drops/Prefabs");
        write_json(&drops.join("Tier1.json"), &json!({}));

        match build_report(&drops, dir.path().join("Prefabs")) {
            Err(Error::MissingDirectory { path, hint }) => {
                assert!(path.ends_with("Prefabs"));
                assert!(hint.contains("Assets.zip"));
            }
            other => panic!("expected missing directory, got {:?}", other),
        }
    }
}
