//! Transform operations
//!
//! Column transformations declared on a mapping entry, and the fixed
//! post-processing keyed on the target attribute name.

use crate::dsl::Transformation;
use crate::numeric::{coerce_numeric, is_missing};
use listing_ir::Value;

/// Bullet points kept per listing
pub const MAX_BULLET_POINTS: usize = 5;

/// Attributes whose values are coerced to numbers
pub const NUMERIC_ATTRIBUTES: [&str; 4] = ["mrp", "price", "listingPrice", "quantity"];

const IMAGE_SEPARATOR: char = ',';
const BULLET_SEPARATOR: char = '|';

/// Apply a declared transformation to a single cell.
///
/// Missing cells are read as the empty string. Case and whitespace
/// transformations turn an empty result into null.
pub fn apply_transformation(value: &Value, transformation: Transformation) -> Value {
    let text = cell_text(value);
    match transformation {
        Transformation::Uppercase => non_empty(text.to_uppercase()),
        Transformation::Lowercase => non_empty(text.to_lowercase()),
        Transformation::Strip => non_empty(text.trim().to_string()),
        Transformation::SplitImages => Value::List(split_trimmed(&text, IMAGE_SEPARATOR)),
    }
}

/// Post-processing tied to a marketplace attribute name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeRule {
    /// `images`: comma-separated URLs become a list
    ImageList,

    /// `bulletPoints`: pipe-separated points, at most [`MAX_BULLET_POINTS`]
    BulletPoints,

    /// Price and quantity attributes: coerced to numbers
    Numeric,
}

impl AttributeRule {
    /// The rule for a target attribute, if any
    pub fn for_attribute(attribute: &str) -> Option<Self> {
        match attribute {
            "images" => Some(Self::ImageList),
            "bulletPoints" => Some(Self::BulletPoints),
            a if NUMERIC_ATTRIBUTES.contains(&a) => Some(Self::Numeric),
            _ => None,
        }
    }

    /// Apply the rule to a (possibly already transformed) cell
    pub fn apply(self, value: &Value) -> Value {
        match self {
            Self::ImageList => Value::List(split_value(value, IMAGE_SEPARATOR)),
            Self::BulletPoints => {
                let mut points = split_value(value, BULLET_SEPARATOR);
                points.truncate(MAX_BULLET_POINTS);
                Value::List(points)
            }
            Self::Numeric => coerce_numeric(value),
        }
    }
}

/// Final cleanup of an output cell: empty strings and NaN become null.
pub fn finalize(value: Value) -> Value {
    match value {
        Value::String(s) if s.is_empty() => Value::Null,
        Value::Float(f) if f.is_nan() => Value::Null,
        other => other,
    }
}

fn cell_text(value: &Value) -> String {
    if is_missing(value) {
        String::new()
    } else {
        value.to_text()
    }
}

fn non_empty(text: String) -> Value {
    if text.is_empty() {
        Value::Null
    } else {
        Value::String(text)
    }
}

fn split_trimmed(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

// Lists are re-split element by element so earlier transformations compose.
fn split_value(value: &Value, separator: char) -> Vec<String> {
    match value {
        Value::List(items) => items
            .iter()
            .flat_map(|item| split_trimmed(item, separator))
            .collect(),
        other => split_trimmed(&cell_text(other), separator),
    }
}
