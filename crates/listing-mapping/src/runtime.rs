//! Mapping runtime
//!
//! Applies a list of column mappings to a seller table, producing one
//! attribute-keyed row per input row.

use crate::dsl::ColumnMapping;
use crate::transforms::{AttributeRule, apply_transformation, finalize};
use listing_ir::{Row, Table, Value, column_key};
use tracing::{debug, trace};

/// Runtime for applying column mappings
#[derive(Debug, Clone, Default)]
pub struct MappingRuntime;

impl MappingRuntime {
    /// Create a new runtime
    pub fn new() -> Self {
        Self
    }

    /// Transform a seller table.
    ///
    /// Mapping entries are matched to columns ignoring case and surrounding
    /// whitespace. Entries whose column is absent from the table are skipped.
    /// The output has exactly one row per input row, in the same order.
    pub fn transform(&self, table: &Table, mappings: &[ColumnMapping]) -> Vec<Row> {
        let mut attributes: Vec<(&str, Vec<Value>)> = Vec::new();

        for mapping in dedupe_by_column(mappings) {
            let Some(column) = table.find_column(&mapping.seller_column) else {
                debug!(
                    seller_column = %mapping.seller_column,
                    attribute = %mapping.marketplace_attribute,
                    "Seller column not found, skipping mapping"
                );
                continue;
            };

            let transformation = mapping.transformation();
            if transformation.is_none() {
                if let Some(name) = &mapping.transformation {
                    debug!(transformation = %name, "Unknown transformation, passing values through");
                }
            }
            let rule = AttributeRule::for_attribute(&mapping.marketplace_attribute);
            trace!(
                column = %column.name,
                attribute = %mapping.marketplace_attribute,
                ?transformation,
                ?rule,
                "Mapping column"
            );

            let values = column
                .values
                .iter()
                .map(|cell| {
                    let mut value = match transformation {
                        Some(t) => apply_transformation(cell, t),
                        None => cell.clone(),
                    };
                    if let Some(rule) = rule {
                        value = rule.apply(&value);
                    }
                    finalize(value)
                })
                .collect();

            let attribute = mapping.marketplace_attribute.as_str();
            match attributes.iter_mut().find(|(name, _)| *name == attribute) {
                Some(slot) => slot.1 = values,
                None => attributes.push((attribute, values)),
            }
        }

        let rows: Vec<Row> = (0..table.row_count())
            .map(|index| {
                let mut row = Row::with_capacity(attributes.len());
                for (name, values) in &attributes {
                    row.insert(*name, values[index].clone());
                }
                row
            })
            .collect();

        debug!(
            rows = rows.len(),
            attributes = attributes.len(),
            "Transformed seller table"
        );
        rows
    }
}

/// Collapse entries that name the same seller column (ignoring case and
/// whitespace). The last entry wins and takes the first entry's position.
fn dedupe_by_column(mappings: &[ColumnMapping]) -> Vec<&ColumnMapping> {
    let mut lookup: Vec<(String, &ColumnMapping)> = Vec::with_capacity(mappings.len());
    for mapping in mappings {
        let key = column_key(&mapping.seller_column);
        match lookup.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = mapping,
            None => lookup.push((key, mapping)),
        }
    }
    lookup.into_iter().map(|(_, mapping)| mapping).collect()
}
