//! Template loader
//!
//! Templates are stored either as a full document
//! (`{name, description?, template: {...}}`) or as a bare attribute map, in
//! JSON or YAML. Bare maps take their name from the file stem.

use crate::model::{MarketplaceTemplate, Schema};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Name given to bare attribute maps loaded from a string
pub const DEFAULT_TEMPLATE_NAME: &str = "template";

const TEMPLATE_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Loads marketplace templates from files or strings
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader {
    search_paths: Vec<PathBuf>,
}

impl TemplateLoader {
    /// Create a loader that resolves template names in the given directories
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Add a search directory
    pub fn add_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Load a template by name from the search paths.
    ///
    /// Tries `<name>.json`, `<name>.yaml` and `<name>.yml` in each directory,
    /// first with the name as given and then lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no file matches, or any error from
    /// [`TemplateLoader::load_from_file`].
    pub fn load(&self, name: &str) -> Result<MarketplaceTemplate> {
        let candidates = [name.to_string(), name.to_lowercase()];
        for dir in &self.search_paths {
            for stem in &candidates {
                for extension in TEMPLATE_EXTENSIONS {
                    let path = dir.join(format!("{stem}.{extension}"));
                    if path.exists() {
                        trace!("Found template file: {:?}", path);
                        return self.load_from_file(&path);
                    }
                }
            }
        }

        Err(Error::NotFound(format!(
            "Template '{}' not found in search paths: {:?}",
            name, self.search_paths
        )))
    }

    /// Load a template from a specific file path
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read, or
    /// [`Error::InvalidFormat`] when it does not parse or names the template
    /// badly.
    pub fn load_from_file(&self, path: &Path) -> Result<MarketplaceTemplate> {
        trace!("Loading template from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let fallback_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_TEMPLATE_NAME);

        let document = if is_yaml(path) {
            parse_yaml(&content)?
        } else {
            parse_json(&content)?
        };

        let template = self.convert(document, fallback_name)?;
        info!(
            template = %template.name,
            attributes = template.template.len(),
            "Loaded marketplace template"
        );
        Ok(template)
    }

    /// Load a template from a JSON string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on malformed input.
    pub fn load_from_json(&self, json: &str) -> Result<MarketplaceTemplate> {
        self.convert(parse_json(json)?, DEFAULT_TEMPLATE_NAME)
    }

    /// Load a template from a YAML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on malformed input.
    pub fn load_from_yaml(&self, yaml: &str) -> Result<MarketplaceTemplate> {
        self.convert(parse_yaml(yaml)?, DEFAULT_TEMPLATE_NAME)
    }

    fn convert(
        &self,
        document: serde_json::Value,
        fallback_name: &str,
    ) -> Result<MarketplaceTemplate> {
        if !document.is_object() {
            return Err(Error::InvalidFormat(
                "Template must be a mapping of attribute names to definitions".to_string(),
            ));
        }

        let template = if document.get("template").is_some() {
            serde_json::from_value::<MarketplaceTemplate>(document)
                .map_err(|e| Error::InvalidFormat(format!("Template document: {e}")))?
        } else {
            debug!(name = fallback_name, "Treating document as a bare attribute map");
            let schema = serde_json::from_value::<Schema>(document)
                .map_err(|e| Error::InvalidFormat(format!("Attribute map: {e}")))?;
            MarketplaceTemplate::new(fallback_name, schema)
        };

        template.validate()?;
        Ok(template)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e == "yaml" || e == "yml")
}

fn parse_json(json: &str) -> Result<serde_json::Value> {
    serde_json::from_str(json).map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))
}

fn parse_yaml(yaml: &str) -> Result<serde_json::Value> {
    serde_yaml::from_str(yaml).map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))
}
