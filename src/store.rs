//! Shared pieces of the configuration and template stores.
//!
//! Both stores map a user-facing name to a file inside a fixed root
//! directory and list the names available there. Listing never fails just
//! because the root is missing or empty.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("Template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Config file must contain a JSON object at the top level: {}", .0.display())]
    NotAnObject(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// True for the "referenced file is absent" kind.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ConfigNotFound(_) | StoreError::TemplateNotFound(_)
        )
    }

    /// True for the "file exists but is not a valid document" kind.
    pub fn is_parse(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::NotAnObject(_))
    }
}

/// Sorted stems of the regular files directly inside `root` with extension `ext`.
///
/// A missing root yields an empty list.
pub fn list_names(root: &Path, ext: &str) -> Result<Vec<String>, StoreError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => StoreError::Io(io),
            None => StoreError::Io(std::io::Error::other("filesystem loop while listing")),
        })?;
        let path = entry.path();
        let matches_ext = path.extension().and_then(|e| e.to_str()) == Some(ext);
        if entry.file_type().is_file() && matches_ext {
            names.push(crate::naming::display_name(path));
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_root_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let names = list_names(&tmp.path().join("absent"), "json").unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn lists_only_matching_files_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("dir.json")).unwrap();

        let names = list_names(tmp.path(), "json").unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn does_not_descend_into_subdirectories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("archive")).unwrap();
        fs::write(tmp.path().join("archive/old.json"), "{}").unwrap();

        assert!(list_names(tmp.path(), "json").unwrap().is_empty());
    }

    #[test]
    fn error_kinds() {
        let nf = StoreError::ConfigNotFound(PathBuf::from("config/x.json"));
        assert!(nf.is_not_found());
        assert!(!nf.is_parse());
        assert_eq!(nf.to_string(), "Config file not found: config/x.json");

        let parse = StoreError::NotAnObject(PathBuf::from("config/x.json"));
        assert!(parse.is_parse());
    }
}
