//! Validation rules
//!
//! Per-attribute type and constraint checks, plus the business rules that
//! apply to prices and image URLs.

use listing_ir::{Row, Value, format_float};
use listing_schema::{AttributeDefinition, AttributeType};
use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|localhost|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})(?::[0-9]+)?(?:/?|[/?]\S+)$",
    )
    .expect("URL pattern is valid")
});

const BOOLEAN_WORDS: [&str; 6] = ["true", "false", "1", "0", "yes", "no"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl RuleResult {
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Check a non-blank value against its attribute's declared type and
/// constraints. Only the first violation is reported.
///
/// Booleans always pass unless `strict_booleans` is set.
#[allow(clippy::cast_precision_loss)]
pub fn validate_field_type(
    field: &str,
    value: &Value,
    definition: &AttributeDefinition,
    strict_booleans: bool,
) -> RuleResult {
    match definition.attr_type {
        AttributeType::String => {
            let Some(text) = value.as_str() else {
                return RuleResult::invalid(format!("Field '{field}' must be a string"));
            };
            match definition.max_length {
                Some(max) if max > 0 && text.chars().count() > max => RuleResult::invalid(format!(
                    "Field '{field}' exceeds maximum length of {max}"
                )),
                _ => RuleResult::valid(),
            }
        }
        AttributeType::Number => match value.to_number() {
            Some(number) => validate_range(field, number, definition),
            None => RuleResult::invalid(format!("Field '{field}' must be a valid number")),
        },
        AttributeType::Integer => match value.to_integer() {
            Some(integer) => validate_range(field, integer as f64, definition),
            None => RuleResult::invalid(format!("Field '{field}' must be a valid integer")),
        },
        AttributeType::Enum => match &definition.enum_values {
            Some(allowed) if !allowed.is_empty() => {
                let member = value
                    .as_str()
                    .is_some_and(|text| allowed.iter().any(|a| a == text));
                if member {
                    RuleResult::valid()
                } else {
                    RuleResult::invalid(format!(
                        "Field '{field}' must be one of: {}",
                        allowed.join(", ")
                    ))
                }
            }
            _ => RuleResult::valid(),
        },
        AttributeType::Array => {
            if value.as_list().is_some() {
                RuleResult::valid()
            } else {
                RuleResult::invalid(format!("Field '{field}' must be an array"))
            }
        }
        AttributeType::Boolean => {
            if !strict_booleans || is_boolean_like(value) {
                RuleResult::valid()
            } else {
                RuleResult::invalid(format!("Field '{field}' must be a boolean"))
            }
        }
    }
}

fn validate_range(field: &str, number: f64, definition: &AttributeDefinition) -> RuleResult {
    if let Some(min) = definition.min_value {
        if number < min.as_f64() {
            return RuleResult::invalid(format!("Field '{field}' must be >= {min}"));
        }
    }
    if let Some(max) = definition.max_value {
        if number > max.as_f64() {
            return RuleResult::invalid(format!("Field '{field}' must be <= {max}"));
        }
    }
    RuleResult::valid()
}

fn is_boolean_like(value: &Value) -> bool {
    match value {
        Value::Boolean(_) => true,
        Value::Integer(i) => *i == 0 || *i == 1,
        Value::String(s) => {
            let word = s.trim().to_ascii_lowercase();
            BOOLEAN_WORDS.contains(&word.as_str())
        }
        _ => false,
    }
}

/// Business rules for a non-blank value, checked whatever the type check
/// concluded.
///
/// * `price` must not exceed the row's `mrp`. Skipped when either side is
///   not numeric.
/// * Attributes starting with `image` must hold http(s) URLs. Every entry of
///   a list must match.
pub fn validate_business_rules(field: &str, value: &Value, row: &Row) -> RuleResult {
    if field == "price" {
        if let Some(mrp) = row.get("mrp") {
            if let (Some(price), Some(mrp)) = (value.to_number(), mrp.to_number()) {
                if price > mrp {
                    return RuleResult::invalid(format!(
                        "Price ({}) cannot be greater than MRP ({})",
                        format_float(price),
                        format_float(mrp)
                    ));
                }
            }
        }
    }

    if field.starts_with("image") && value.is_truthy() {
        let valid = match value {
            Value::List(urls) => urls.iter().all(|url| is_valid_url(url)),
            other => is_valid_url(&other.to_text()),
        };
        if !valid {
            return RuleResult::invalid(format!("Field '{field}' must be a valid URL"));
        }
    }

    RuleResult::valid()
}

/// Whether `url` is an absolute http(s) URL with a domain, `localhost` or a
/// dotted-quad host.
pub fn is_valid_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}
