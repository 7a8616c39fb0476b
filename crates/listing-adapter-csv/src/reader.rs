//! CSV reader

use crate::config::{CsvConfig, TabularFormat};
use crate::errors::{CsvError, CsvResult, RowLengthMismatchKind};
use listing_ir::{Column, Row, Table, Value, normalize_column_name};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

/// Columns and a few leading rows of a seller file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    /// Cleaned column names, in file order
    pub columns: Vec<String>,
    /// The first rows, keyed by column name
    pub sample_rows: Vec<Row>,
    /// Number of data rows in the file
    pub row_count: usize,
}

/// Reader for CSV files
#[derive(Debug, Clone, Default)]
pub struct CsvReader {
    config: CsvConfig,
}

impl CsvReader {
    /// Create a new CSV reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// The reader's configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Read a whole table.
    ///
    /// Header names lose byte-order marks and surrounding whitespace. Empty
    /// headers become `Unnamed: <index>` and repeated ones get a `.1`, `.2`
    /// suffix. Without a header row columns are named `column_1..n`.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::RowLengthMismatch`] when a record has more fields
    /// than the header, and a read error for malformed CSV.
    pub fn read<R: Read>(&self, reader: R) -> CsvResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.config.delimiter_u8()?)
            .quote(self.config.quote_char_u8()?)
            .from_reader(reader);
        let mut records = csv_reader.records();

        let Some(first) = records.next().transpose()? else {
            debug!("CSV input is empty");
            return Ok(Table::new());
        };

        let width = first.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
        let headers = if self.config.has_header {
            clean_headers(first.iter())
        } else {
            self.push_record(&mut cells, &first, 1)?;
            (1..=width).map(|i| format!("column_{i}")).collect()
        };

        for record in records {
            let record = record?;
            let line = record
                .position()
                .and_then(|p| usize::try_from(p.line()).ok())
                .unwrap_or(0);
            self.push_record(&mut cells, &record, line)?;
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| {
                let values = if self.config.infer_types {
                    infer_column(values)
                } else {
                    values.into_iter().map(Value::from).collect()
                };
                Column::new(name, values)
            })
            .collect();
        let table = Table::from_columns(columns)
            .map_err(|e| CsvError::read(format!("Inconsistent table shape: {e}")))?;

        debug!(
            rows = table.row_count(),
            columns = table.columns().len(),
            "Read CSV table"
        );
        Ok(table)
    }

    /// Read a file, choosing the delimiter from its extension. `.tsv` files
    /// are always tab-separated; `.csv` files use the configured delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::UnsupportedFileType`] for other extensions, an I/O
    /// error when the file cannot be opened, or any error from
    /// [`CsvReader::read`].
    pub fn read_path(&self, path: &Path) -> CsvResult<Table> {
        let format = TabularFormat::from_path(path)?;
        let file = File::open(path)?;
        trace!(path = %path.display(), ?format, "Opening seller file");
        match format {
            TabularFormat::Csv => self.read(file),
            TabularFormat::Tsv => CsvReader::new()
                .with_config(self.config.clone().for_format(format))
                .read(file),
        }
    }

    /// Summarize a table: column names, the first `sample_size` rows and
    /// the row count.
    ///
    /// # Errors
    ///
    /// Same as [`CsvReader::read`].
    pub fn inspect<R: Read>(&self, reader: R) -> CsvResult<FileSummary> {
        Ok(self.summarize(&self.read(reader)?))
    }

    /// Summarize a file
    ///
    /// # Errors
    ///
    /// Same as [`CsvReader::read_path`].
    pub fn inspect_path(&self, path: &Path) -> CsvResult<FileSummary> {
        Ok(self.summarize(&self.read_path(path)?))
    }

    fn summarize(&self, table: &Table) -> FileSummary {
        FileSummary {
            columns: table.column_names().into_iter().map(str::to_string).collect(),
            sample_rows: table.head(self.config.sample_size),
            row_count: table.row_count(),
        }
    }

    fn push_record(
        &self,
        cells: &mut [Vec<Option<String>>],
        record: &csv::StringRecord,
        line: usize,
    ) -> CsvResult<()> {
        let width = cells.len();
        if record.len() > width {
            return Err(CsvError::row_length_mismatch(
                line,
                width,
                record.len(),
                RowLengthMismatchKind::Extra,
            ));
        }
        if record.len() < width {
            trace!(line, expected = width, actual = record.len(), "Padding short record");
        }

        for (index, column) in cells.iter_mut().enumerate() {
            let cell = record
                .get(index)
                .filter(|cell| !self.config.is_null_value(cell))
                .map(str::to_string);
            column.push(cell);
        }
        Ok(())
    }
}

fn clean_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for (index, name) in raw.enumerate() {
        let mut name = normalize_column_name(name);
        if name.is_empty() {
            name = format!("Unnamed: {index}");
        }
        let base = name.clone();
        let mut suffix = 1;
        while headers.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(name);
    }
    headers
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

/// Give a column one type: integer, float, boolean or text, in that order
/// of preference. Nulls do not affect the choice.
fn infer_column(cells: Vec<Option<String>>) -> Vec<Value> {
    let present = || cells.iter().flatten();
    let kind = if present().all(|c| c.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if present().all(|c| c.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if present().all(|c| parse_bool(c).is_some()) {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    };

    cells
        .into_iter()
        .map(|cell| match cell {
            None => Value::Null,
            Some(text) => match kind {
                ColumnKind::Integer => text.parse::<i64>().map_or(Value::Null, Value::Integer),
                ColumnKind::Float => text.parse::<f64>().map_or(Value::Null, Value::Float),
                ColumnKind::Boolean => parse_bool(&text).map_or(Value::Null, Value::Boolean),
                ColumnKind::Text => Value::String(text),
            },
        })
        .collect()
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cleans_headers_and_infers_types() {
        let csv = "\u{feff} SKU ,Qty,Price,Active,Name\nA1,3,10,true,Shirt\nA2,,12.5,FALSE,NA\n";
        let table = CsvReader::new().read(csv.as_bytes()).unwrap();

        assert_eq!(table.column_names(), vec!["SKU", "Qty", "Price", "Active", "Name"]);
        assert_eq!(table.row_count(), 2);

        let row = table.row(0).unwrap();
        assert_eq!(row.get("SKU"), Some(&Value::from("A1")));
        assert_eq!(row.get("Qty"), Some(&Value::Integer(3)));
        assert_eq!(row.get("Price"), Some(&Value::Float(10.0)));
        assert_eq!(row.get("Active"), Some(&Value::Boolean(true)));

        let row = table.row(1).unwrap();
        assert_eq!(row.get("Qty"), Some(&Value::Null));
        assert_eq!(row.get("Active"), Some(&Value::Boolean(false)));
        assert_eq!(row.get("Name"), Some(&Value::Null));
    }

    #[test]
    fn test_read_without_inference_keeps_text() {
        let reader = CsvReader::new().with_config(CsvConfig::new().infer_types(false));
        let table = reader.read("a,b\n007,\n".as_bytes()).unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.get("a"), Some(&Value::from("007")));
        assert_eq!(row.get("b"), Some(&Value::Null));
    }

    #[test]
    fn test_read_without_header() {
        let reader = CsvReader::new().with_config(CsvConfig::new().without_header());
        let table = reader.read("x,1\ny,2\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = CsvReader::new().read("a,b,c\n1,2\n".as_bytes()).unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.get("c"), Some(&Value::Null));
    }

    #[test]
    fn test_long_rows_are_rejected_with_line() {
        let err = CsvReader::new()
            .read("a,b\n1,2\n3,4,5\n".as_bytes())
            .unwrap_err();
        match err {
            CsvError::RowLengthMismatch {
                line,
                expected,
                actual,
                kind,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
                assert_eq!(kind, RowLengthMismatchKind::Extra);
            }
            other => panic!("expected row length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_and_duplicate_headers() {
        let table = CsvReader::new().read("Name,,Name, Name \n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["Name", "Unnamed: 1", "Name.1", "Name.2"]
        );
    }

    #[test]
    fn test_empty_input() {
        let table = CsvReader::new().read("".as_bytes()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());

        let table = CsvReader::new().read("a,b\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_quoted_fields_and_custom_delimiter() {
        let reader = CsvReader::new().with_config(CsvConfig::new().delimiter(';'));
        let table = reader
            .read("name;price\n\"Shirt; blue\";\"1,299\"\n".as_bytes())
            .unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.get("name"), Some(&Value::from("Shirt; blue")));
        assert_eq!(row.get("price"), Some(&Value::from("1,299")));
    }

    #[test]
    fn test_inspect_samples_rows() {
        let reader = CsvReader::new().with_config(CsvConfig::new().sample_size(2));
        let summary = reader.inspect("a\n1\n2\n3\n".as_bytes()).unwrap();
        assert_eq!(summary.columns, vec!["a"]);
        assert_eq!(summary.sample_rows.len(), 2);
        assert_eq!(summary.row_count, 3);
    }

    #[test]
    fn test_read_path_rejects_spreadsheets() {
        let err = CsvReader::new()
            .read_path(Path::new("listing.xlsx"))
            .unwrap_err();
        assert!(matches!(err, CsvError::UnsupportedFileType(_)));
    }
}
