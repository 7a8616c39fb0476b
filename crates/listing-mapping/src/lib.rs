//! # listing-mapping
//!
//! Column mappings and the seller-table transformer.
//!
//! A [`MappingSet`] names, for each seller column, the marketplace attribute
//! it feeds and an optional transformation. [`MappingRuntime`] applies a set
//! to a [`Table`](listing_ir::Table): it matches columns loosely, runs the
//! declared transformation, then the fixed per-attribute post-processing
//! (image lists, bullet points, numeric coercion).

pub mod dsl;
pub mod numeric;
pub mod runtime;
pub mod transforms;

pub use dsl::{ColumnMapping, MappingDsl, MappingSet, ParseError, Transformation};
pub use runtime::MappingRuntime;

use listing_ir::{Row, Table};

/// Transform a seller table with the default runtime
pub fn transform(table: &Table, mappings: &[ColumnMapping]) -> Vec<Row> {
    MappingRuntime::new().transform(table, mappings)
}
