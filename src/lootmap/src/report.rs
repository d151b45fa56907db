//! Consolidated report types
//!
//! The report is the hand-off artifact between extraction and icon
//! resolution, and is also loaded directly by the browser front end, so the
//! serialized field names are part of the interface.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::document::collect_strings_for_key;
use crate::{Error, Result, ITEM_ID_KEY};

/// Block coordinate inside a prefab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// A spawner block and the loot table it draws from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestEntry {
    pub location: Location,
    pub loot_table_id: String,
}

/// One prefab file containing at least one chest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabRecord {
    /// Top-level directory under the prefab root, or `Root` for loose files
    pub structure_name: String,
    /// File name including extension
    pub prefab_name: String,
    /// `/`-separated path relative to the prefab root
    pub relative_path_from_root: String,
    pub total_chests: usize,
    pub chests: Vec<ChestEntry>,
}

impl PrefabRecord {
    pub fn new(structure_name: String, prefab_name: String, relative_path: String) -> Self {
        Self {
            structure_name,
            prefab_name,
            relative_path_from_root: relative_path,
            total_chests: 0,
            chests: Vec::new(),
        }
    }

    pub fn push_chest(&mut self, chest: ChestEntry) {
        self.chests.push(chest);
        self.total_chests = self.chests.len();
    }
}

/// Referenced loot tables joined with chest placements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    pub loot_table_definitions: BTreeMap<String, Value>,
    pub prefabs: Vec<PrefabRecord>,
}

impl ConsolidatedReport {
    /// Load a report previously written by [`ConsolidatedReport::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::json(path, e))
    }

    /// Write the report as pretty-printed JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = self.to_json_pretty().map_err(|e| Error::json(path, e))?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Total spawner blocks across all prefabs
    pub fn total_chests(&self) -> usize {
        self.prefabs.iter().map(|p| p.total_chests).sum()
    }

    /// Every distinct item identifier referenced by the loot table definitions
    ///
    /// Prefab records carry no item references, so only the definitions are
    /// walked.
    pub fn item_ids(&self) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        for definition in self.loot_table_definitions.values() {
            ids.extend(collect_strings_for_key(definition, ITEM_ID_KEY));
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_report() -> ConsolidatedReport {
        let mut prefab = PrefabRecord::new(
            "Dungeons".to_string(),
            "Crypt_01.json".to_string(),
            "Dungeons/Crypt_01.json".to_string(),
        );
        prefab.push_chest(ChestEntry {
            location: Location { x: 1, y: 64, z: -3 },
            loot_table_id: "Tier1".to_string(),
        });
        prefab.push_chest(ChestEntry {
            location: Location { x: 4, y: 64, z: -3 },
            loot_table_id: "Tier9".to_string(),
        });

        let mut report = ConsolidatedReport::default();
        report
            .loot_table_definitions
            .insert("Tier1".to_string(), json!({"Container": {}}));
        report.prefabs.push(prefab);
        report
    }

    #[test]
    fn test_push_chest_updates_total() {
        let report = sample_report();
        assert_eq!(report.prefabs[0].total_chests, 2);
        assert_eq!(report.total_chests(), 2);
    }

    #[test]
    fn test_field_names() {
        let value = serde_json::to_value(sample_report()).unwrap();
        let prefab = &value["prefabs"][0];
        assert_eq!(prefab["structure_name"], "Dungeons");
        assert_eq!(prefab["prefab_name"], "Crypt_01.json");
        assert_eq!(prefab["relative_path_from_root"], "Dungeons/Crypt_01.json");
        assert_eq!(prefab["total_chests"], 2);
        assert_eq!(prefab["chests"][0]["location"]["z"], -3);
        assert_eq!(prefab["chests"][0]["loot_table_id"], "Tier1");
        assert!(value["loot_table_definitions"]["Tier1"].is_object());
    }

    #[test]
    fn test_item_ids_from_definitions() {
        let mut report = sample_report();
        report.loot_table_definitions.insert(
            "Tier2".to_string(),
            json!({"Container": {"Containers": [
                {"Item": {"ItemId": "Food_Kebab_Meat"}},
                {"Item": {"ItemId": "Ingredient_Charcoal"}}
            ]}}),
        );
        report
            .loot_table_definitions
            .insert("Tier3".to_string(), json!({"Item": {"ItemId": "Food_Kebab_Meat"}}));

        let ids: Vec<_> = report.item_ids().into_iter().collect();
        assert_eq!(ids, vec!["Food_Kebab_Meat", "Ingredient_Charcoal"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.json");

        let report = sample_report();
        report.save(&path).unwrap();

        assert_eq!(ConsolidatedReport::load(&path).unwrap(), report);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ConsolidatedReport::load(&path),
            Err(Error::Json { .. })
        ));
    }
}
