//! CSV configuration options

use crate::errors::{CsvError, CsvResult};
use std::path::Path;

/// Cell texts read as missing values
pub const DEFAULT_NULL_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Configuration for CSV reading and writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    /// Field delimiter character (default: comma)
    pub delimiter: char,
    /// Quote character for fields containing special characters (default: double quote)
    pub quote_char: char,
    /// Whether the CSV has a header row (default: true)
    pub has_header: bool,
    /// Infer integer, float and boolean columns (default: true)
    pub infer_types: bool,
    /// Cell texts read as null
    pub null_values: Vec<String>,
    /// Rows returned by an inspection (default: 5)
    pub sample_size: usize,
    /// Separator used when writing list cells (default: `|`)
    pub list_separator: String,
    /// How to represent null values in output (default: empty string)
    pub null_representation: NullRepresentation,
    /// Record terminator (default: CRLF for writing)
    pub record_terminator: RecordTerminator,
}

/// How to represent null values in CSV output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NullRepresentation {
    /// Empty string (default)
    EmptyString,
    /// The string "NULL"
    NullString,
    /// Custom string representation
    Custom(String),
}

impl NullRepresentation {
    pub fn as_str(&self) -> &str {
        match self {
            NullRepresentation::EmptyString => "",
            NullRepresentation::NullString => "NULL",
            NullRepresentation::Custom(s) => s,
        }
    }
}

/// Record terminator for writing CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTerminator {
    /// CRLF (Windows-style, default for RFC 4180)
    CRLF,
    /// LF (Unix-style)
    LF,
}

/// Tabular file formats the reader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl TabularFormat {
    /// Pick a format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::UnsupportedFileType`] for any other extension,
    /// spreadsheets included.
    pub fn from_path(path: &Path) -> CsvResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(CsvError::UnsupportedFileType(path.display().to_string())),
        }
    }

    /// Field delimiter for this format
    pub fn delimiter(self) -> char {
        match self {
            Self::Csv => ',',
            Self::Tsv => '\t',
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            has_header: true,
            infer_types: true,
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| (*s).to_string()).collect(),
            sample_size: 5,
            list_separator: "|".to_string(),
            null_representation: NullRepresentation::EmptyString,
            record_terminator: RecordTerminator::CRLF,
        }
    }
}

impl CsvConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter character
    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    #[must_use]
    pub fn quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Configure header presence
    #[must_use]
    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Disable header row
    #[must_use]
    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }

    /// Turn column type inference on or off
    #[must_use]
    pub fn infer_types(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    /// Replace the cell texts read as null
    #[must_use]
    pub fn null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the inspection sample size
    #[must_use]
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the list separator used by the writer
    #[must_use]
    pub fn list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }

    /// Set null representation
    #[must_use]
    pub fn null_representation(mut self, null_rep: NullRepresentation) -> Self {
        self.null_representation = null_rep;
        self
    }

    /// Set record terminator
    #[must_use]
    pub fn record_terminator(mut self, terminator: RecordTerminator) -> Self {
        self.record_terminator = terminator;
        self
    }

    /// Use the delimiter of a file format
    #[must_use]
    pub fn for_format(self, format: TabularFormat) -> Self {
        self.delimiter(format.delimiter())
    }

    /// Whether a raw cell reads as null
    pub fn is_null_value(&self, cell: &str) -> bool {
        self.null_values.iter().any(|v| v == cell)
    }

    /// Convert delimiter to u8 for csv crate
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::Config`] when the delimiter is not ASCII.
    pub fn delimiter_u8(&self) -> CsvResult<u8> {
        ascii_byte(self.delimiter, "delimiter")
    }

    /// Convert quote char to u8 for csv crate
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::Config`] when the quote character is not ASCII.
    pub fn quote_char_u8(&self) -> CsvResult<u8> {
        ascii_byte(self.quote_char, "quote character")
    }
}

fn ascii_byte(c: char, what: &str) -> CsvResult<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| CsvError::config(format!("{what} must be a single ASCII character, got {c:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CsvConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.quote_char, '"');
        assert!(config.has_header);
        assert!(config.infer_types);
        assert_eq!(config.sample_size, 5);
        assert_eq!(config.list_separator, "|");
        assert_eq!(config.null_representation, NullRepresentation::EmptyString);
        assert_eq!(config.record_terminator, RecordTerminator::CRLF);
        assert!(config.is_null_value("NA"));
        assert!(config.is_null_value(""));
        assert!(!config.is_null_value("  "));
    }

    #[test]
    fn test_config_builder() {
        let config = CsvConfig::new()
            .delimiter(';')
            .quote_char('\'')
            .without_header()
            .infer_types(false)
            .null_values(["-"])
            .sample_size(2)
            .list_separator(";")
            .null_representation(NullRepresentation::NullString)
            .record_terminator(RecordTerminator::LF);

        assert_eq!(config.delimiter, ';');
        assert_eq!(config.quote_char, '\'');
        assert!(!config.has_header);
        assert!(!config.infer_types);
        assert!(config.is_null_value("-"));
        assert!(!config.is_null_value("NA"));
        assert_eq!(config.sample_size, 2);
        assert_eq!(config.null_representation.as_str(), "NULL");
        assert_eq!(config.record_terminator, RecordTerminator::LF);
    }

    #[test]
    fn test_config_conversions() {
        let config = CsvConfig::new().delimiter('\t').quote_char('\'');
        assert_eq!(config.delimiter_u8().unwrap(), b'\t');
        assert_eq!(config.quote_char_u8().unwrap(), b'\'');

        let err = CsvConfig::new().delimiter('§').delimiter_u8().unwrap_err();
        assert!(matches!(err, CsvError::Config(_)));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            TabularFormat::from_path(Path::new("sellers/Apparel.CSV")).unwrap(),
            TabularFormat::Csv
        );
        assert_eq!(
            TabularFormat::from_path(Path::new("a.tsv")).unwrap(),
            TabularFormat::Tsv
        );
        for name in ["listing.xlsx", "listing.xls", "listing"] {
            let err = TabularFormat::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, CsvError::UnsupportedFileType(_)));
        }
        assert_eq!(
            CsvConfig::new().for_format(TabularFormat::Tsv).delimiter,
            '\t'
        );
    }
}
