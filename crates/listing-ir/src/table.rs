//! Column-oriented seller tables

use crate::row::Row;
use crate::value::Value;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Clean a raw column header: drop byte-order marks and surrounding
/// whitespace. Casing is preserved.
pub fn normalize_column_name(name: &str) -> String {
    name.replace(BYTE_ORDER_MARK, "").trim().to_string()
}

/// Key used to match column names against mapping entries.
pub fn column_key(name: &str) -> String {
    normalize_column_name(name).to_lowercase()
}

/// A named column of cell values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column header as it appeared in the source
    pub name: String,
    /// Cell values, one per row
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Whether this column matches a normalized, lowercased key
    pub fn matches_key(&self, key: &str) -> bool {
        column_key(&self.name) == key
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A fully materialized table: ordered columns sharing one row count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking they all share a length
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when column lengths differ.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the column length differs from
    /// the columns already present.
    pub fn push_column(&mut self, column: Column) -> Result<&mut Self> {
        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(Error::shape_mismatch(
                column.name,
                self.row_count,
                column.values.len(),
            ));
        }
        self.columns.push(column);
        Ok(self)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order, as stored
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a column by its exact stored name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find the first column whose header matches `name` ignoring case,
    /// surrounding whitespace and byte-order marks.
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        let key = column_key(name);
        self.columns.iter().find(|c| c.matches_key(&key))
    }

    /// Materialize a single row keyed by stored column names
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] when `index` is past the last row.
    pub fn row(&self, index: usize) -> Result<Row> {
        if index >= self.row_count {
            return Err(Error::RowOutOfBounds {
                index,
                row_count: self.row_count,
            });
        }
        Ok(self
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.values[index].clone()))
            .collect())
    }

    /// The first `n` rows (fewer if the table is shorter)
    pub fn head(&self, n: usize) -> Vec<Row> {
        (0..n.min(self.row_count))
            .map(|index| {
                self.columns
                    .iter()
                    .map(|c| (c.name.clone(), c.values[index].clone()))
                    .collect()
            })
            .collect()
    }
}
