//! # listing-adapter-csv
//!
//! CSV adapter for reading seller files and writing transformed listings.
//!
//! Seller files are read into a column-oriented [`Table`](listing_ir::Table)
//! with per-column type inference. Transformed rows are written back out with
//! list cells joined by a configurable separator.
//!
//! ## Example Usage
//!
//! ```rust
//! use listing_adapter_csv::{CsvAdapter, CsvConfig};
//!
//! let adapter = CsvAdapter::new().with_config(CsvConfig::new().delimiter(';'));
//! let table = adapter.reader().read("sku;price\nA1;999\n".as_bytes()).unwrap();
//! assert_eq!(table.row_count(), 1);
//! ```

pub mod config;
pub mod errors;
pub mod reader;
pub mod writer;

// Re-export main types
pub use config::{CsvConfig, NullRepresentation, RecordTerminator, TabularFormat};
pub use errors::{CsvError, CsvResult, RowLengthMismatchKind};
pub use reader::{CsvReader, FileSummary};
pub use writer::CsvWriter;

/// CSV adapter that combines reader and writer functionality
#[derive(Debug, Clone, Default)]
pub struct CsvAdapter {
    config: CsvConfig,
}

impl CsvAdapter {
    /// Create a new CSV adapter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create adapter with configuration
    #[must_use]
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// The adapter's configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Get a reader configured with this adapter's settings
    pub fn reader(&self) -> CsvReader {
        CsvReader::new().with_config(self.config.clone())
    }

    /// Get a writer configured with this adapter's settings
    pub fn writer(&self) -> CsvWriter {
        CsvWriter::new().with_config(self.config.clone())
    }
}
