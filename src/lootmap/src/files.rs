//! File system utilities for asset directory traversal

use std::path::{Component, Path, PathBuf};

/// Structure name used for prefab files sitting directly in the prefab root
pub const ROOT_STRUCTURE: &str = "Root";

/// Walk files in a directory tree, filtering by extension
///
/// Calls the handler for each file matching the extension filter, in
/// file-name order within each directory. Extension should not include the
/// dot (e.g., "json" not ".json"). Unreadable entries are skipped.
pub fn walk_files_with_extension<F>(path: &Path, extensions: &[&str], mut handler: F)
where
    F: FnMut(&Path),
{
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();

        let matches = file_path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)));

        if matches {
            handler(file_path);
        }
    }
}

/// Collect files matching extension into a vector
pub fn collect_files_with_extension(path: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_files_with_extension(path, extensions, |file_path| {
        files.push(file_path.to_path_buf());
    });
    files
}

/// Files directly inside `path` matching extension, sorted by file name
///
/// Subdirectories are not descended into.
pub fn list_files_with_extension(path: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    walkdir::WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        })
        .map(|e| e.into_path())
        .collect()
}

/// Structure name and `/`-joined relative path of a file under `root`
///
/// The structure name is the first directory below the root, or
/// [`ROOT_STRUCTURE`] for files placed directly in it.
pub fn relative_parts(root: &Path, path: &Path) -> (String, String) {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let structure = if parts.len() > 1 {
        parts[0].clone()
    } else {
        ROOT_STRUCTURE.to_string()
    };

    (structure, parts.join("/"))
}

/// File name as an owned string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name without its final extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
