//! Icon file catalog
//!
//! Holds the available icon file names and a case-insensitive index from
//! extension-stripped name to real file name. Only files whose extension is
//! spelled exactly as configured are icons, since consumers build paths as
//! `<name>.<ext>`.

use std::collections::HashMap;
use std::path::Path;

use crate::files::{file_name, list_files_with_extension};
use crate::{Error, Result};

/// Default icon directory, relative to the working directory
pub const DEFAULT_ICON_DIR: &str = "ItemsGenerated";

/// Image extension of icon files (without the dot)
pub const DEFAULT_ICON_EXTENSION: &str = "png";

/// Strip `.ext` from the end of `name`
pub fn strip_extension<'a>(name: &'a str, extension: &str) -> &'a str {
    name.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name)
}

fn has_extension(name: &str, extension: &str) -> bool {
    strip_extension(name, extension).len() < name.len()
}

/// Available icon files and their lookup index
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    extension: String,
    files: Vec<String>,
    /// lowercase base name → real file name
    index: HashMap<String, String>,
}

impl IconCatalog {
    /// Build a catalog from file names (with extension)
    ///
    /// Names without `.<extension>` are dropped. File names are kept in
    /// sorted order. If two names normalize to the same key, the later one
    /// in that order replaces the earlier one.
    pub fn from_names<I, S>(names: I, extension: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|f| has_extension(f, extension))
            .collect();
        files.sort();
        files.dedup();

        let index = files
            .iter()
            .map(|f| (strip_extension(f, extension).to_lowercase(), f.clone()))
            .collect();

        Self {
            extension: extension.to_string(),
            files,
            index,
        }
    }

    /// List the icon files directly inside `dir`
    ///
    /// Subfolders are ignored: consumers address icons as
    /// `<dir>/<name>.<ext>`.
    pub fn scan<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::MissingDirectory {
                path: dir.to_path_buf(),
                hint: "Point --icons at the folder of generated item icons".to_string(),
            });
        }

        let (names, skipped): (Vec<String>, Vec<String>) =
            list_files_with_extension(dir, &[extension])
                .iter()
                .map(|p| file_name(p))
                .partition(|name| has_extension(name, extension));

        for name in &skipped {
            tracing::warn!("Ignoring {}: extension must be '.{}'", name, extension);
        }
        tracing::debug!("Found {} icon files in {}", names.len(), dir.display());
        Ok(Self::from_names(names, extension))
    }

    /// Real file name for `name`, compared case-insensitively
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.index.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Real base name (extension stripped) for `name`
    pub fn lookup_base(&self, name: &str) -> Option<&str> {
        self.lookup(name).map(|f| self.base_name(f))
    }

    /// Strip this catalog's extension from a file name
    pub fn base_name<'a>(&self, file: &'a str) -> &'a str {
        strip_extension(file, &self.extension)
    }

    /// All icon file names, sorted
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
