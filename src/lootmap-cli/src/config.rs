//! Configuration management for lootmap CLI

use anyhow::{Context, Result};
use lootmap::ResolverSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default input and output locations
///
/// Unset entries fall back to the conventional asset layout relative to the
/// working directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub loot_tables: Option<PathBuf>,
    pub prefabs: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub icons: Option<PathBuf>,
    /// Icon folder written into the lookup script, relative to the viewer
    pub icon_prefix: Option<String>,
    /// Icon file extension, without the dot
    pub icon_extension: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub resolver: ResolverSettings,
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("lootmap");

        Ok(config_dir.join("config.toml"))
    }

    /// Resolve an explicit config path or the default one
    pub fn path_or_default(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::path_or_default(path)?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        config
            .resolver
            .validate()
            .with_context(|| format!("Invalid resolver section in {}", config_path.display()))?;

        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    pub fn loot_table_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.paths.loot_tables.clone())
            .unwrap_or_else(|| PathBuf::from(lootmap::DEFAULT_LOOT_TABLE_DIR))
    }

    pub fn prefab_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.paths.prefabs.clone())
            .unwrap_or_else(|| PathBuf::from(lootmap::DEFAULT_PREFAB_DIR))
    }

    pub fn report_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.paths.report.clone())
            .unwrap_or_else(|| PathBuf::from(lootmap::DEFAULT_REPORT_FILE))
    }

    pub fn icon_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.paths.icons.clone())
            .unwrap_or_else(|| PathBuf::from(lootmap::DEFAULT_ICON_DIR))
    }

    pub fn icon_prefix(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.paths.icon_prefix.clone())
            .unwrap_or_else(|| lootmap::DEFAULT_ICON_DIR.to_string())
    }

    pub fn icon_extension(&self) -> &str {
        self.paths
            .icon_extension
            .as_deref()
            .unwrap_or(lootmap::DEFAULT_ICON_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("none.toml").as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.icon_extension(), "png");
        assert_eq!(config.report_path(None), PathBuf::from("mapped_prefabs_data.json"));
        assert_eq!(config.icon_prefix(None), "ItemsGenerated");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.paths.icons = Some(PathBuf::from("assets/icons"));
        config.resolver.cutoff = 0.75;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.resolver.aliases.len(), 6);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[paths]
prefabs = "dump/Prefabs"

[resolver]
cutoff = 0.8

[[resolver.aliases]]
pattern = "Longsword"
replacement = "Sword"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.prefab_dir(None), PathBuf::from("dump/Prefabs"));
        assert_eq!(config.loot_table_dir(None), PathBuf::from("Drops/Prefabs"));
        assert_eq!(config.resolver.instance_suffix, "_Item");
        assert_eq!(config.resolver.aliases.apply("Weapon_Longsword"), "Weapon_Sword");
    }

    #[test]
    fn test_flag_overrides_config() {
        let mut config = Config::default();
        config.paths.report = Some(PathBuf::from("from_config.json"));
        assert_eq!(
            config.report_path(Some(PathBuf::from("from_flag.json"))),
            PathBuf::from("from_flag.json")
        );
        assert_eq!(config.report_path(None), PathBuf::from("from_config.json"));

        config.paths.icons = Some(PathBuf::from("/data/dump/ItemsGenerated"));
        assert_eq!(config.icon_prefix(None), "ItemsGenerated");
        config.paths.icon_prefix = Some("static/icons".to_string());
        assert_eq!(config.icon_prefix(None), "static/icons");
        assert_eq!(config.icon_prefix(Some("cdn".to_string())), "cdn");
    }

    #[test]
    fn test_invalid_cutoff_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[resolver]\ncutoff = 2.0\n").unwrap();
        assert!(Config::load(Some(path.as_path())).is_err());
    }
}
