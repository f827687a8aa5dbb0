//! Configuration documents: the JSON files that fill in a template.
//!
//! A configuration document is a JSON object. Values may be strings,
//! numbers, booleans, null, nested objects or arrays; no schema is imposed.
//! Keys a template asks for but the document lacks simply render empty.
//!
//! ```json
//! {
//!   "subject": "March update",
//!   "hero": { "title": "Spring release", "image": "https://..." },
//!   "articles": [
//!     { "title": "New lab", "url": "https://..." }
//!   ]
//! }
//! ```

use crate::naming;
use crate::store::{self, StoreError};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed configuration document. Always a JSON object at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument(Value);

impl ConfigDocument {
    /// Parse raw document bytes. `path` is only used for error messages.
    ///
    /// Bytes that are not valid UTF-8 JSON are a parse error.
    pub fn parse(bytes: impl AsRef<[u8]>, path: &Path) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_slice(bytes.as_ref()).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err(StoreError::NotAnObject(path.to_path_buf()))
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The document as a JSON value; the root scope when rendering.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Pretty-printed form used when writing documents back to disk.
    pub fn to_pretty_json(&self) -> Result<String, StoreError> {
        let mut text = serde_json::to_string_pretty(&self.0)?;
        text.push('\n');
        Ok(text)
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Map<String, Value>> for ConfigDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

/// Loads, lists and clones configuration documents under one root directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of the document called `name` (with or without `.json`).
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(naming::config_file_name(name))
    }

    /// Load and parse the document called `name`.
    pub fn load(&self, name: &str) -> Result<ConfigDocument, StoreError> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(StoreError::ConfigNotFound(path));
        }
        let bytes = fs::read(&path)?;
        ConfigDocument::parse(bytes, &path)
    }

    /// Names of all documents in the root, sorted. Empty if there are none.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        store::list_names(&self.root, naming::CONFIG_EXTENSION)
    }

    /// Write `document` under `name`, creating the root if needed.
    ///
    /// An existing file of the same name is overwritten.
    pub fn save(&self, name: &str, document: &ConfigDocument) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(name);
        fs::write(&path, document.to_pretty_json()?)?;
        Ok(path)
    }

    /// Copy the document `source` to `new_name` and return the copy.
    ///
    /// The target is overwritten silently when it already exists.
    pub fn clone_config(&self, source: &str, new_name: &str) -> Result<ConfigDocument, StoreError> {
        let document = self.load(source)?;
        self.save(new_name, &document)?;
        Ok(document)
    }
}
