//! CSV writer

use crate::config::{CsvConfig, RecordTerminator};
use crate::errors::{CsvError, CsvResult};
use listing_ir::{Row, Value};
use std::io::Write;
use tracing::{debug, trace};

/// Writer for CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvWriter {
    config: CsvConfig,
}

impl CsvWriter {
    /// Create a new CSV writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure header writing
    #[must_use]
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    /// Set delimiter character
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Write transformed rows.
    ///
    /// The header is the union of all row keys in first-seen order; a row
    /// without some key gets the null representation in that column.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the underlying
    /// writer fails.
    pub fn write_rows<W: Write>(&self, writer: W, rows: &[Row]) -> CsvResult<()> {
        let mut headers: Vec<&str> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !headers.contains(&key) {
                    headers.push(key);
                }
            }
        }

        let records: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|header| self.cell(row.get(header).unwrap_or(&Value::Null)))
                    .collect()
            })
            .collect();

        self.write_with_headers(writer, &headers, &records)
    }

    /// Write records under a header row. The header is skipped when the
    /// configuration has none or there are no columns.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the underlying
    /// writer fails.
    pub fn write_with_headers<W: Write, H: AsRef<str>>(
        &self,
        writer: W,
        headers: &[H],
        records: &[Vec<String>],
    ) -> CsvResult<()> {
        let terminator = match self.config.record_terminator {
            RecordTerminator::CRLF => csv::Terminator::CRLF,
            RecordTerminator::LF => csv::Terminator::Any(b'\n'),
        };
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.config.delimiter_u8()?)
            .quote(self.config.quote_char_u8()?)
            .terminator(terminator)
            .from_writer(writer);

        if self.config.has_header && !headers.is_empty() {
            csv_writer
                .write_record(headers.iter().map(AsRef::as_ref))
                .map_err(|e| CsvError::write(e.to_string()))?;
        }

        for record in records {
            csv_writer
                .write_record(record)
                .map_err(|e| CsvError::write(e.to_string()))?;
            trace!(?record, "Wrote CSV row");
        }

        csv_writer
            .flush()
            .map_err(|e| CsvError::write(e.to_string()))?;
        debug!(record_count = records.len(), "Finished writing CSV");
        Ok(())
    }

    fn cell(&self, value: &Value) -> String {
        match value {
            Value::Null => self.config.null_representation.as_str().to_string(),
            Value::List(items) => items.join(&self.config.list_separator),
            other => other.to_text(),
        }
    }
}
