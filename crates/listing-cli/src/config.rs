//! CLI configuration file

use anyhow::{Context, Result, bail};
use listing_adapter_csv::CsvConfig;
use listing_pipeline::PipelineConfig;
use listing_validation::ValidationConfig;
use serde::Deserialize;
use std::path::Path;

/// Settings read from the `--config` YAML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Field delimiter for CSV input and output
    pub delimiter: Option<char>,
    /// Largest seller file accepted, in rows
    pub max_rows: Option<usize>,
    /// Rows shown by `inspect`
    pub sample_size: Option<usize>,
    /// Reject values of boolean attributes that do not read as booleans
    pub strict_booleans: bool,
    /// Stop validating after this many errors (0 = unlimited)
    pub max_errors: usize,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        if let Some(delimiter) = config.delimiter {
            if !delimiter.is_ascii() {
                bail!("delimiter must be a single ASCII character, got {delimiter:?}");
            }
        }
        Ok(config)
    }

    /// Reader and writer settings
    pub fn csv_config(&self) -> CsvConfig {
        let mut csv = CsvConfig::new();
        if let Some(delimiter) = self.delimiter {
            csv = csv.delimiter(delimiter);
        }
        if let Some(sample_size) = self.sample_size {
            csv = csv.sample_size(sample_size);
        }
        csv
    }

    /// Pipeline settings
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            max_rows: self.max_rows,
            validation: ValidationConfig::default()
                .strict_booleans(self.strict_booleans)
                .max_errors(self.max_errors),
            csv: self.csv_config(),
        }
    }
}
