//! Validation engine

use crate::rules::{validate_business_rules, validate_field_type};
use listing_ir::{Row, Value};
use listing_mapping::ColumnMapping;
use listing_schema::{AttributeDefinition, Schema};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject values of boolean attributes that do not read as booleans
    #[serde(default)]
    pub strict_booleans: bool,
    /// Maximum errors before stopping (0 = unlimited)
    #[serde(default)]
    pub max_errors: usize,
}

impl ValidationConfig {
    #[must_use]
    pub fn strict_booleans(mut self, strict: bool) -> Self {
        self.strict_booleans = strict;
        self
    }

    #[must_use]
    pub fn max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub is_valid: bool,
    /// Errors in row order, then mapping order within a row
    pub errors: Vec<ValidationError>,
    /// Non-blocking notes
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a new valid result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.is_valid = false;
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// A single failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Marketplace attribute that failed
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// 1-based row number, when the error belongs to a row
    pub row: Option<usize>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, row: Option<usize>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            row,
        }
    }
}

/// Main validation engine
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create a new validation engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specific configuration
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate transformed rows against a template schema.
    ///
    /// Only attributes reached through `mappings` are checked. Mapping
    /// entries sharing a seller column collapse to the last one, keeping the
    /// first one's position.
    pub fn validate(
        &self,
        rows: &[Row],
        schema: &Schema,
        mappings: &[ColumnMapping],
    ) -> ValidationResult {
        let checks = self.plan(schema, mappings);
        let mut result = ValidationResult::valid();
        let mut stopped = false;

        'rows: for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            for (attribute, definition) in &checks {
                if self.limit_reached(&result) {
                    stopped = true;
                    break 'rows;
                }
                let value = row.get(attribute).unwrap_or(&Value::Null);
                self.check_value(attribute, value, definition, row, row_number, &mut result);
            }
        }

        // one value can fail both its type and business checks
        if self.config.max_errors > 0 && result.errors.len() > self.config.max_errors {
            result.errors.truncate(self.config.max_errors);
            stopped = true;
        }
        if stopped {
            result.add_warning(format!(
                "Validation stopped after {} errors",
                self.config.max_errors
            ));
        }

        debug!(
            rows = rows.len(),
            checks = checks.len(),
            errors = result.errors.len(),
            "Validated rows"
        );
        result
    }

    /// Resolve the mapped attributes to check, in mapping order, normalizing
    /// each template entry once.
    fn plan<'s>(
        &self,
        schema: &'s Schema,
        mappings: &'s [ColumnMapping],
    ) -> Vec<(&'s str, Cow<'s, AttributeDefinition>)> {
        let mut entries: Vec<(&str, &str)> = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            let seller = mapping.seller_column.as_str();
            let attribute = mapping.marketplace_attribute.as_str();
            match entries.iter_mut().find(|(s, _)| *s == seller) {
                Some(slot) => slot.1 = attribute,
                None => entries.push((seller, attribute)),
            }
        }

        let mut resolved: Vec<(&str, Option<Cow<'s, AttributeDefinition>>)> = Vec::new();
        let mut checks = Vec::with_capacity(entries.len());
        for (_, attribute) in entries {
            let Some(entry) = schema.get(attribute) else {
                continue;
            };
            let definition = match resolved.iter().find(|(name, _)| *name == attribute) {
                Some((_, cached)) => cached.clone(),
                None => {
                    let normalized = match entry.normalize() {
                        Ok(definition) => Some(definition),
                        Err(e) => {
                            debug!(attribute, error = %e, "Skipping unreadable attribute definition");
                            None
                        }
                    };
                    resolved.push((attribute, normalized.clone()));
                    normalized
                }
            };
            if let Some(definition) = definition {
                checks.push((attribute, definition));
            }
        }
        checks
    }

    fn check_value(
        &self,
        attribute: &str,
        value: &Value,
        definition: &AttributeDefinition,
        row: &Row,
        row_number: usize,
        result: &mut ValidationResult,
    ) {
        if value.is_blank() {
            if definition.required {
                result.add_error(ValidationError::new(
                    attribute,
                    format!("Required field '{attribute}' is missing or empty"),
                    Some(row_number),
                ));
            }
            return;
        }

        let checks = [
            validate_field_type(attribute, value, definition, self.config.strict_booleans),
            validate_business_rules(attribute, value, row),
        ];
        for message in checks.into_iter().filter_map(|check| check.message) {
            result.add_error(ValidationError::new(attribute, message, Some(row_number)));
        }
    }

    fn limit_reached(&self, result: &ValidationResult) -> bool {
        self.config.max_errors > 0 && result.errors.len() >= self.config.max_errors
    }
}
