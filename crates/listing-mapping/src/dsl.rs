//! Mapping definitions
//!
//! A mapping set pairs seller columns with marketplace attributes, each with
//! an optional named transformation. Sets are written in YAML (JSON is
//! accepted as well, being a YAML subset).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Longest accepted mapping-set name, in characters
pub const MAX_MAPPING_NAME_LENGTH: usize = 200;

/// Name given to bare mapping lists
pub const DEFAULT_MAPPING_NAME: &str = "mapping";

/// One seller column to marketplace attribute correspondence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Column header in the seller file
    pub seller_column: String,

    /// Target attribute in the marketplace template
    pub marketplace_attribute: String,

    /// Named transformation to apply to the column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<String>,
}

impl ColumnMapping {
    /// Create a mapping with no transformation
    pub fn new(seller_column: impl Into<String>, marketplace_attribute: impl Into<String>) -> Self {
        Self {
            seller_column: seller_column.into(),
            marketplace_attribute: marketplace_attribute.into(),
            transformation: None,
        }
    }

    /// Attach a named transformation
    #[must_use]
    pub fn with_transformation(mut self, transformation: impl Into<String>) -> Self {
        self.transformation = Some(transformation.into());
        self
    }

    /// The declared transformation, if it names a known one
    pub fn transformation(&self) -> Option<Transformation> {
        self.transformation.as_deref().and_then(Transformation::parse)
    }
}

/// Known column transformations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformation {
    /// Convert to uppercase
    Uppercase,

    /// Convert to lowercase
    Lowercase,

    /// Trim whitespace
    Strip,

    /// Split a comma-separated list of image URLs
    SplitImages,
}

impl Transformation {
    /// Parse a transformation name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "uppercase" => Some(Self::Uppercase),
            "lowercase" => Some(Self::Lowercase),
            "strip" => Some(Self::Strip),
            "split_images" => Some(Self::SplitImages),
            _ => None,
        }
    }

    /// The transformation's name as written in mapping files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Strip => "strip",
            Self::SplitImages => "split_images",
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, ordered list of column mappings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingSet {
    /// Mapping name
    pub name: String,

    /// Column mappings in declaration order
    #[serde(default)]
    pub column_mapping: Vec<ColumnMapping>,
}

impl MappingSet {
    /// Create a mapping set
    pub fn new(name: impl Into<String>, column_mapping: Vec<ColumnMapping>) -> Self {
        Self {
            name: name.into(),
            column_mapping,
        }
    }

    /// Column mappings in declaration order
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.column_mapping
    }
}

/// Mapping file parser
pub struct MappingDsl;

/// Parse error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl ParseError {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, " at line {line}, column {col}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl MappingDsl {
    /// Parse a mapping set from YAML or JSON.
    ///
    /// Accepts either a full `{name, column_mapping}` document or a bare list
    /// of column mappings, which is named [`DEFAULT_MAPPING_NAME`].
    ///
    /// # Errors
    ///
    /// Returns an error when parsing fails or the set name is out of bounds.
    pub fn parse(source: &str) -> Result<MappingSet, ParseError> {
        Self::parse_named(source, DEFAULT_MAPPING_NAME)
    }

    /// Parse a mapping set from a file. Bare lists are named after the file
    /// stem.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn parse_file(path: &Path) -> Result<MappingSet, ParseError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ParseError::message(format!("Failed to read file: {e}")))?;
        let fallback_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_MAPPING_NAME);
        Self::parse_named(&content, fallback_name)
    }

    /// Serialize a mapping set to YAML
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_yaml(mapping: &MappingSet) -> Result<String, ParseError> {
        serde_yaml::to_string(mapping)
            .map_err(|e| ParseError::message(format!("Failed to serialize: {e}")))
    }

    fn parse_named(source: &str, fallback_name: &str) -> Result<MappingSet, ParseError> {
        let document: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| ParseError {
            message: format!("Failed to parse mapping: {e}"),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
        })?;

        let mapping = if document.is_sequence() {
            let column_mapping: Vec<ColumnMapping> = serde_yaml::from_value(document)
                .map_err(|e| ParseError::message(format!("Invalid column mapping list: {e}")))?;
            MappingSet::new(fallback_name, column_mapping)
        } else {
            serde_yaml::from_value(document)
                .map_err(|e| ParseError::message(format!("Invalid mapping document: {e}")))?
        };

        let len = mapping.name.chars().count();
        if len == 0 || len > MAX_MAPPING_NAME_LENGTH {
            return Err(ParseError::message(format!(
                "Mapping name must be between 1 and {MAX_MAPPING_NAME_LENGTH} characters, got {len}"
            )));
        }

        Ok(mapping)
    }
}
