//! Tool settings: where templates, configs and generated emails live.
//!
//! Settings are read from an optional `newsletter-gen.toml` in the install
//! root. The file is flat and every key is optional: it only needs the keys
//! it wants to change.
//!
//! ```text
//! install-root/
//! ├── newsletter-gen.toml         # Optional settings (this module)
//! ├── templates/                  # *.template files
//! │   └── newsletter.template
//! ├── config/                     # *.json configuration documents
//! │   └── email-config-example.json
//! └── output/                     # Generated emails (created on demand)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the settings file inside the install root.
pub const SETTINGS_FILE: &str = "newsletter-gen.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Settings validation error: {0}")]
    Validation(String),
}

/// Layout and naming settings.
///
/// Directory values are relative to the install root unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory holding the template files.
    pub templates_dir: String,
    /// Directory holding the JSON configuration documents.
    pub config_dir: String,
    /// Directory generated emails are written to.
    pub output_dir: String,
    /// Extension of template files, without the dot.
    pub template_extension: String,
    /// Template used by `generate` when none is given.
    pub default_template: String,
    /// Configuration cloned by `new-config` when no base is given.
    pub example_config: String,
    /// Prefix of timestamped output names.
    pub output_prefix: String,
    /// Extension of timestamped output names, without the dot.
    pub output_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: "templates".to_string(),
            config_dir: "config".to_string(),
            output_dir: "output".to_string(),
            template_extension: "template".to_string(),
            default_template: "newsletter".to_string(),
            example_config: "email-config-example".to_string(),
            output_prefix: "newsletter".to_string(),
            output_extension: "mjml".to_string(),
        }
    }
}

impl Settings {
    /// Reject values that would produce unusable paths or names.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let required = [
            ("templates_dir", &self.templates_dir),
            ("config_dir", &self.config_dir),
            ("output_dir", &self.output_dir),
            ("template_extension", &self.template_extension),
            ("default_template", &self.default_template),
            ("example_config", &self.example_config),
            ("output_prefix", &self.output_prefix),
            ("output_extension", &self.output_extension),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(SettingsError::Validation(format!("{key} must not be empty")));
            }
        }
        for (key, ext) in [
            ("template_extension", &self.template_extension),
            ("output_extension", &self.output_extension),
        ] {
            if ext.starts_with('.') {
                return Err(SettingsError::Validation(format!(
                    "{key} must not start with a dot (got \"{ext}\")"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the three directories against the install root.
    pub fn layout(&self, root: &Path) -> Layout {
        Layout {
            template_root: root.join(&self.templates_dir),
            config_root: root.join(&self.config_dir),
            output_root: root.join(&self.output_dir),
        }
    }
}

/// Absolute (or root-relative) directories derived from [`Settings`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub template_root: PathBuf,
    pub config_root: PathBuf,
    pub output_root: PathBuf,
}

/// Load settings for an install root.
///
/// A missing `newsletter-gen.toml` yields [`Settings::default`]; keys the file
/// leaves out keep their default values.
pub fn load_settings(root: &Path) -> Result<Settings, SettingsError> {
    let path = root.join(SETTINGS_FILE);
    let settings = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str::<Settings>(&content)?
    } else {
        Settings::default()
    };
    settings.validate()?;
    Ok(settings)
}

/// A fully commented stock `newsletter-gen.toml`, printed by `gen-settings`.
pub fn stock_settings_toml() -> &'static str {
    r##"# newsletter-gen settings
# =======================
# All settings are optional. Values shown below are the defaults.
# Directories are relative to the install root (--root).
# Unknown keys will cause an error.

# Where *.template files live.
templates_dir = "templates"

# Where *.json configuration documents live.
config_dir = "config"

# Where generated emails are written. Created on first use.
output_dir = "output"

# Extension of template files (no leading dot).
template_extension = "template"

# Template used by `generate` when --template is not given.
default_template = "newsletter"

# Configuration cloned by `new-config` when --from is not given.
example_config = "email-config-example"

# Generated names look like <output_prefix>_20250101_093000.<output_extension>
output_prefix = "newsletter"
output_extension = "mjml"
"##
}
