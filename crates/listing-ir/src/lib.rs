#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # listing-ir
//!
//! In-memory tables, rows and cell values for seller listing data.
//!
//! A seller file is loaded into a column-oriented [`Table`]; the mapping
//! runtime turns it into one [`Row`] per input row, keyed by marketplace
//! attribute name.

/// Insertion-ordered rows keyed by attribute name.
pub mod row;
/// Column-oriented tables and column-name normalization.
pub mod table;
/// Cell values and their coercions.
pub mod value;

pub use row::Row;
pub use table::{Column, Table, column_key, normalize_column_name};
pub use value::{Value, float_to_integer, format_float};

use thiserror::Error;

/// Errors that can occur when building tables
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Column '{column}' has {found} values, expected {expected}")]
    ShapeMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Row {index} is out of bounds for a table of {row_count} rows")]
    RowOutOfBounds { index: usize, row_count: usize },
}

impl Error {
    /// Build a shape-mismatch error for a column of the wrong length.
    pub fn shape_mismatch(column: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            column: column.into(),
            expected,
            found,
        }
    }
}

/// Crate-local result type for table operations.
pub type Result<T> = std::result::Result<T, Error>;
