//! Template files: raw email markup with mustache markers.
//!
//! Templates are read as opaque text; the [`crate::render`] module is the
//! only thing that looks inside them.

use crate::naming;
use crate::store::{self, StoreError};
use std::fs;
use std::path::PathBuf;

/// Loads and lists templates under one root directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
    extension: String,
}

impl TemplateStore {
    /// `extension` is given without the leading dot, e.g. `"template"`.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Location of the template called `name` (with or without extension).
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(naming::with_extension(name, &self.extension))
    }

    pub fn load(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(StoreError::TemplateNotFound(path));
        }
        Ok(fs::read_to_string(&path)?)
    }

    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        store::list_names(&self.root, &self.extension)
    }
}
