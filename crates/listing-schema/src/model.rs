//! Marketplace schema model

use crate::{Error, Result};
use listing_ir::format_float;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Longest accepted template name, in characters
pub const MAX_TEMPLATE_NAME_LENGTH: usize = 100;

/// Declared type of a marketplace attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Enum,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => write!(f, "string"),
            AttributeType::Number => write!(f, "number"),
            AttributeType::Integer => write!(f, "integer"),
            AttributeType::Boolean => write!(f, "boolean"),
            AttributeType::Array => write!(f, "array"),
            AttributeType::Enum => write!(f, "enum"),
        }
    }
}

/// A numeric bound as authored in the template.
///
/// Integer and float bounds are kept apart so messages render `0` and `0.5`
/// exactly as the template wrote them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericBound {
    Integer(i64),
    Float(f64),
}

impl NumericBound {
    /// The bound as a float, for comparisons
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            NumericBound::Integer(i) => i as f64,
            NumericBound::Float(f) => f,
        }
    }
}

impl fmt::Display for NumericBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericBound::Integer(i) => write!(f, "{i}"),
            NumericBound::Float(value) => f.write_str(&format_float(*value)),
        }
    }
}

impl From<i64> for NumericBound {
    fn from(value: i64) -> Self {
        NumericBound::Integer(value)
    }
}

impl From<i32> for NumericBound {
    fn from(value: i32) -> Self {
        NumericBound::Integer(i64::from(value))
    }
}

impl From<f64> for NumericBound {
    fn from(value: f64) -> Self {
        NumericBound::Float(value)
    }
}

/// Definition of a single marketplace attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    #[serde(default, deserialize_with = "lax_bool")]
    pub required: bool,
    #[serde(
        default,
        deserialize_with = "lax_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<NumericBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<NumericBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttributeDefinition {
    /// Create an optional attribute with no constraints
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            max_length: None,
            min_value: None,
            max_value: None,
            enum_values: None,
            description: None,
        }
    }

    /// Mark as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set max length
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// Set the lower bound
    #[must_use]
    pub fn min_value(mut self, bound: impl Into<NumericBound>) -> Self {
        self.min_value = Some(bound.into());
        self
    }

    /// Set the upper bound
    #[must_use]
    pub fn max_value(mut self, bound: impl Into<NumericBound>) -> Self {
        self.max_value = Some(bound.into());
        self
    }

    /// Set the allowed enum values, in display order
    #[must_use]
    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LaxBool {
    Bool(bool),
    Integer(i64),
    Text(String),
}

/// Accepts booleans, `0`/`1` and the usual boolean words.
fn lax_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    match LaxBool::deserialize(deserializer)? {
        LaxBool::Bool(b) => Ok(b),
        LaxBool::Integer(0) => Ok(false),
        LaxBool::Integer(1) => Ok(true),
        LaxBool::Integer(i) => Err(D::Error::custom(format!("invalid boolean: {i}"))),
        LaxBool::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(D::Error::custom(format!("invalid boolean: {text:?}"))),
        },
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LaxLength {
    Integer(u64),
    Float(f64),
    Text(String),
}

/// Accepts a non-negative integer, an integral float such as `50.0`, or
/// either of those as text.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lax_length<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<usize>, D::Error> {
    let length = match Option::<LaxLength>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(LaxLength::Integer(n)) => usize::try_from(n).ok(),
        Some(LaxLength::Float(f)) => {
            (f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX)).then_some(f as usize)
        }
        Some(LaxLength::Text(text)) => {
            let text = text.trim();
            text.parse::<usize>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as usize)
            })
        }
    };
    length
        .map(Some)
        .ok_or_else(|| D::Error::custom("max_length must be a non-negative whole number"))
}

/// A schema entry as stored: either a typed definition or the untyped record
/// it was persisted as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeEntry {
    Typed(AttributeDefinition),
    Raw(serde_json::Value),
}

impl AttributeEntry {
    /// Interpret the entry as an [`AttributeDefinition`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAttribute`] when a raw record lacks a name or
    /// type, or carries fields of the wrong shape.
    pub fn normalize(&self) -> Result<Cow<'_, AttributeDefinition>> {
        match self {
            AttributeEntry::Typed(definition) => Ok(Cow::Borrowed(definition)),
            AttributeEntry::Raw(record) => {
                serde_json::from_value::<AttributeDefinition>(record.clone())
                    .map(Cow::Owned)
                    .map_err(|e| {
                        let name = record
                            .get("name")
                            .and_then(serde_json::Value::as_str)
                            .unwrap_or("<unnamed>");
                        Error::invalid_attribute(name, e.to_string())
                    })
            }
        }
    }
}

impl From<AttributeDefinition> for AttributeEntry {
    fn from(definition: AttributeDefinition) -> Self {
        AttributeEntry::Typed(definition)
    }
}

impl From<serde_json::Value> for AttributeEntry {
    fn from(record: serde_json::Value) -> Self {
        AttributeEntry::Raw(record)
    }
}

/// Attribute name to definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    attributes: BTreeMap<String, AttributeEntry>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a typed definition keyed by its own name
    pub fn insert(&mut self, definition: AttributeDefinition) -> &mut Self {
        self.attributes
            .insert(definition.name.clone(), AttributeEntry::Typed(definition));
        self
    }

    /// Builder form of [`Schema::insert`]
    #[must_use]
    pub fn with(mut self, definition: AttributeDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Add an entry under an explicit key
    pub fn insert_entry(&mut self, name: impl Into<String>, entry: impl Into<AttributeEntry>) {
        self.attributes.insert(name.into(), entry.into());
    }

    /// Get an entry
    pub fn get(&self, name: &str) -> Option<&AttributeEntry> {
        self.attributes.get(name)
    }

    /// Check if an attribute exists
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Normalized definition for an attribute, if present
    pub fn definition(&self, name: &str) -> Option<Result<Cow<'_, AttributeDefinition>>> {
        self.attributes.get(name).map(AttributeEntry::normalize)
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeEntry)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the schema has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<AttributeDefinition> for Schema {
    fn from_iter<I: IntoIterator<Item = AttributeDefinition>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for definition in iter {
            schema.insert(definition);
        }
        schema
    }
}

/// A named marketplace template wrapping its attribute schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub template: Schema,
}

impl MarketplaceTemplate {
    /// Create a template
    pub fn new(name: impl Into<String>, template: Schema) -> Self {
        Self {
            name: name.into(),
            description: None,
            template,
        }
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The attribute schema
    pub fn schema(&self) -> &Schema {
        &self.template
    }

    /// Check the template name is non-empty and within length limits
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for an empty or over-long name.
    pub fn validate(&self) -> Result<()> {
        let len = self.name.chars().count();
        if len == 0 || len > MAX_TEMPLATE_NAME_LENGTH {
            return Err(Error::InvalidFormat(format!(
                "Template name must be between 1 and {MAX_TEMPLATE_NAME_LENGTH} characters, got {len}"
            )));
        }
        Ok(())
    }
}
