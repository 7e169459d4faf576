use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::schema::ConfigDocument;
use crate::error::{CcsError, Result};

const BUNDLED_TEMPLATE: &str = include_str!("../../templates/ccs-providers.json");

/// Where a missing config document is created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template compiled into the binary.
    Bundled,
    /// A template file on disk.
    File(PathBuf),
}

/// Loads and persists the provider document at one explicit path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    template: TemplateSource,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template: TemplateSource::Bundled,
        }
    }

    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the document from the template when it does not exist yet.
    /// Returns `true` when a new file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.create_from_template()?;
        Ok(true)
    }

    /// Load the document, creating it from the template first if needed.
    /// Structural validation runs on every load.
    pub fn load(&self) -> Result<ConfigDocument> {
        self.ensure_exists()?;

        let contents = fs::read_to_string(&self.path).map_err(|e| self.unreadable(e))?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| self.unreadable(e))?;
        let document = ConfigDocument::from_value(value)?;

        debug!(
            path = %self.path.display(),
            providers = document.providers.len(),
            "loaded provider config"
        );
        Ok(document)
    }

    /// Write the full document back as pretty-printed JSON.
    pub fn save(&self, document: &ConfigDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| CcsError::Other(anyhow::Error::new(e).context("serialize config")))?;
        self.write_file(&json)?;
        debug!(path = %self.path.display(), "saved provider config");
        Ok(())
    }

    fn create_from_template(&self) -> Result<()> {
        let raw = match &self.template {
            TemplateSource::Bundled => BUNDLED_TEMPLATE.to_string(),
            TemplateSource::File(template) => {
                if !template.exists() {
                    return Err(self.unreadable(format!(
                        "template {} does not exist",
                        template.display()
                    )));
                }
                fs::read_to_string(template).map_err(|e| {
                    self.unreadable(format!("template {}: {e}", template.display()))
                })?
            }
        };

        let template: Value = serde_json::from_str(&raw)
            .map_err(|e| self.unreadable(format!("template is not valid JSON: {e}")))?;
        let json = serde_json::to_string_pretty(&template)
            .map_err(|e| self.unreadable(format!("template: {e}")))?;

        self.write_file(&json).map_err(|e| self.unreadable(e))?;
        info!(path = %self.path.display(), "created provider config from template");
        Ok(())
    }

    fn write_file(&self, json: &str) -> Result<()> {
        let write_err = |source| CcsError::ConfigWrite {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, format!("{json}\n")).map_err(write_err)
    }

    fn unreadable(&self, reason: impl ToString) -> CcsError {
        CcsError::ConfigUnreadable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
