//! Generated icon lookup artifact
//!
//! The front end loads a small script holding the resolved mappings and a
//! `getIconPath` accessor. Only ids whose icon is *not* at
//! `<icon_dir>/<id>.<ext>` need an entry; everything else takes the
//! fallback path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::icons::{DEFAULT_ICON_DIR, DEFAULT_ICON_EXTENSION};
use crate::{Error, Result};

/// Default output file for the generated script
pub const DEFAULT_MAPPINGS_FILE: &str = "icon_mappings.js";

/// Resolved id → icon base name table plus the path convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconMappings {
    /// Directory prefix of icon paths as seen by the consumer
    pub icon_dir: String,
    /// Icon file extension (without the dot)
    pub extension: String,
    pub mappings: BTreeMap<String, String>,
}

impl Default for IconMappings {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl IconMappings {
    pub fn new(mappings: BTreeMap<String, String>) -> Self {
        Self {
            icon_dir: DEFAULT_ICON_DIR.to_string(),
            extension: DEFAULT_ICON_EXTENSION.to_string(),
            mappings,
        }
    }

    pub fn with_paths(mut self, icon_dir: &str, extension: &str) -> Self {
        self.icon_dir = icon_dir.trim_end_matches('/').to_string();
        self.extension = extension.to_string();
        self
    }

    /// Icon base name for `id`: the mapped name, or the id itself
    pub fn icon_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.mappings.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Icon path for `id`, following the same fallback as `getIconPath`
    pub fn icon_path(&self, id: &str) -> String {
        format!("{}/{}.{}", self.icon_dir, self.icon_name(id), self.extension)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Render the lookup table and accessor as a browser script
    ///
    /// Keys are emitted in sorted order so unchanged inputs produce
    /// byte-identical output.
    pub fn render_js(&self) -> String {
        let mut js = String::from("const ICON_MAPPINGS = {\n");
        for (id, icon) in &self.mappings {
            let _ = writeln!(js, "    '{}': '{}',", js_escape(id), js_escape(icon));
        }
        js.push_str("};\n\n");

        let dir = js_template_escape(&self.icon_dir);
        let ext = js_template_escape(&self.extension);
        let _ = write!(
            js,
            "function getIconPath(itemId) {{\n\
             \x20   if (ICON_MAPPINGS[itemId]) {{\n\
             \x20       return `{dir}/${{ICON_MAPPINGS[itemId]}}.{ext}`;\n\
             \x20   }}\n\
             \x20   // Default fallback: try the item ID itself\n\
             \x20   return `{dir}/${{itemId}}.{ext}`;\n\
             }}\n"
        );
        js
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load mappings previously written as JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&content).map_err(|e| Error::json(path, e))
    }
}

/// Escape a value for a single-quoted JavaScript string literal
fn js_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for a JavaScript template literal
fn js_template_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}
