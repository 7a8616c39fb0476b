#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # listing-validation
//!
//! Validation of transformed listing rows against a marketplace template.
//!
//! Each mapped attribute is checked for presence, declared type and
//! constraints, then for the price and image-URL business rules. Errors are
//! collected rather than raised, so one run reports everything wrong with a
//! seller file.
//!
//! ## Example Usage
//!
//! ```rust
//! use listing_ir::Row;
//! use listing_mapping::ColumnMapping;
//! use listing_schema::{AttributeDefinition, AttributeType, Schema};
//! use listing_validation::ValidationEngine;
//!
//! let schema = Schema::new()
//!     .with(AttributeDefinition::new("productName", AttributeType::String).required());
//! let mappings = vec![ColumnMapping::new("Name", "productName")];
//! let rows = vec![Row::new().with("productName", "Linen Shirt"), Row::new()];
//!
//! let result = ValidationEngine::new().validate(&rows, &schema, &mappings);
//! assert!(!result.is_valid);
//! assert_eq!(result.errors[0].row, Some(2));
//! ```

pub mod engine;
pub mod reporter;
pub mod rules;

// Re-export main types
pub use engine::{ValidationConfig, ValidationEngine, ValidationError, ValidationResult};
pub use reporter::{ValidationReport, ValidationReporter};
pub use rules::{RuleResult, is_valid_url, validate_business_rules, validate_field_type};

use listing_ir::Row;
use listing_mapping::ColumnMapping;
use listing_schema::Schema;

/// Convenience function to validate rows with default settings
pub fn validate(rows: &[Row], schema: &Schema, mappings: &[ColumnMapping]) -> ValidationResult {
    ValidationEngine::new().validate(rows, schema, mappings)
}
