//! The generate pipeline and the `new-config` scaffold.
//!
//! ```text
//! config/<name>.json ──┐
//!                      ├─→ render ─→ output/<name>.mjml
//! templates/<t>.template┘
//! ```
//!
//! A [`Workspace`] bundles the two stores and the output root resolved from
//! [`Settings`]. Every action is all-or-nothing: a missing or malformed input
//! stops the pipeline before anything is written.
//!
//! ## Output Names
//!
//! Without an explicit name the output is called
//! `<output_prefix>_<YYYYmmdd_HHMMSS>.<output_extension>` using local time.
//! Two runs within the same second without explicit names write to the same
//! file; the later one wins.

use crate::config_store::ConfigStore;
use crate::naming;
use crate::render::{Template, TemplateSyntaxError};
use crate::settings::{self, Settings, SettingsError};
use crate::store::StoreError;
use crate::template_store::TemplateStore;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Template syntax error in {}: {source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: TemplateSyntaxError,
    },
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to generate. Only the configuration name is required.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub config: String,
    pub template: Option<String>,
    pub output: Option<String>,
}

impl GenerateRequest {
    pub fn new(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
            ..Self::default()
        }
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.output = Some(name.into());
        self
    }
}

/// Result of a successful generate run.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub config_name: String,
    pub config_path: PathBuf,
    pub template_name: String,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub bytes: usize,
}

/// The stores and output root of one install root.
#[derive(Debug, Clone)]
pub struct Workspace {
    settings: Settings,
    configs: ConfigStore,
    templates: TemplateStore,
    output_root: PathBuf,
}

impl Workspace {
    /// Load `newsletter-gen.toml` (if any) from `root` and resolve the layout.
    pub fn open(root: &Path) -> Result<Self, GenerateError> {
        let settings = settings::load_settings(root)?;
        Ok(Self::with_settings(root, settings))
    }

    pub fn with_settings(root: &Path, settings: Settings) -> Self {
        let layout = settings.layout(root);
        Self {
            configs: ConfigStore::new(layout.config_root),
            templates: TemplateStore::new(layout.template_root, settings.template_extension.clone()),
            output_root: layout.output_root,
            settings,
        }
    }

    pub fn configs(&self) -> &ConfigStore {
        &self.configs
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Load, render and write, naming the output from the current local time
    /// when the request has no explicit name.
    pub fn generate(&self, request: &GenerateRequest) -> Result<Generated, GenerateError> {
        self.generate_at(request, chrono::Local::now().naive_local())
    }

    /// [`Workspace::generate`] with an explicit clock reading.
    pub fn generate_at(
        &self,
        request: &GenerateRequest,
        now: NaiveDateTime,
    ) -> Result<Generated, GenerateError> {
        let config_path = self.configs.path_for(&request.config);
        let document = self.configs.load(&request.config)?;

        let template_name = request
            .template
            .clone()
            .unwrap_or_else(|| self.settings.default_template.clone());
        let template_path = self.templates.path_for(&template_name);
        let source = self.templates.load(&template_name)?;
        let template = Template::compile(&source).map_err(|source| GenerateError::Syntax {
            path: template_path.clone(),
            source,
        })?;

        let rendered = template.render(&document);

        let output_name = match &request.output {
            Some(name) => name.clone(),
            None => naming::timestamped_output_name(
                &self.settings.output_prefix,
                &self.settings.output_extension,
                now,
            ),
        };
        fs::create_dir_all(&self.output_root)?;
        let output_path = self.output_root.join(output_name);
        fs::write(&output_path, rendered.as_bytes())?;

        Ok(Generated {
            config_name: naming::display_name(&config_path),
            config_path,
            template_name,
            template_path,
            output_path,
            bytes: rendered.len(),
        })
    }

    /// Create configuration `name` as a copy of `based_on`, or of the example
    /// configuration from settings. Overwrites an existing `name`.
    pub fn new_config(&self, name: &str, based_on: Option<&str>) -> Result<PathBuf, GenerateError> {
        let source = based_on.unwrap_or(&self.settings.example_config);
        self.configs.clone_config(source, name)?;
        Ok(self.configs.path_for(name))
    }
}
