//! Pipeline orchestration
//!
//! Reads a seller table, applies column mappings and validates the result
//! against a marketplace template.

use crate::{Error, Result};
use listing_adapter_csv::{CsvConfig, CsvReader};
use listing_ir::{Row, Table};
use listing_mapping::{ColumnMapping, MappingRuntime, MappingSet};
use listing_schema::{MarketplaceTemplate, Schema};
use listing_validation::{ValidationConfig, ValidationEngine, ValidationReport, ValidationResult};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Pipeline configuration
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Largest table accepted (None = unlimited)
    pub max_rows: Option<usize>,
    /// Validation settings
    pub validation: ValidationConfig,
    /// Reader settings for seller files
    pub csv: CsvConfig,
}

impl PipelineConfig {
    #[must_use]
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    #[must_use]
    pub fn validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    #[must_use]
    pub fn csv(mut self, csv: CsvConfig) -> Self {
        self.csv = csv;
        self
    }
}

/// Transformed rows with their validation outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub data: Vec<Row>,
    pub validation_result: ValidationResult,
    pub total_rows: usize,
    pub valid_rows: usize,
    /// Distinct rows with at least one error
    pub invalid_rows: usize,
}

impl PipelineOutput {
    /// Row-level summary of the validation result
    pub fn report(&self) -> ValidationReport {
        ValidationReport::from_result(&self.validation_result, self.total_rows)
    }
}

/// Pipeline statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Completed runs
    pub runs: usize,
    /// Rows transformed across all runs
    pub rows_processed: usize,
    /// Rows with validation errors across all runs
    pub rows_invalid: usize,
    /// Validation errors across all runs
    pub validation_errors: usize,
    /// Total processing time
    pub total_processing_time: Duration,
}

/// Transform-and-validate pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    runtime: MappingRuntime,
    stats: PipelineStats,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            runtime: MappingRuntime::new(),
            stats: PipelineStats::default(),
        }
    }

    /// Create a pipeline with default configuration
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The pipeline's configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Statistics accumulated over this pipeline's runs
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Read a seller file with the configured reader
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] when the file cannot be read or parsed.
    pub fn read_file(&self, path: &Path) -> Result<Table> {
        CsvReader::new()
            .with_config(self.config.csv.clone())
            .read_path(path)
            .map_err(|e| Error::input(path.display().to_string(), e.to_string()))
    }

    /// Transform a table without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowLimitExceeded`] when the table is over the
    /// configured row cap.
    pub fn transform(&self, table: &Table, mappings: &[ColumnMapping]) -> Result<Vec<Row>> {
        self.check_row_limit(table)?;
        Ok(self.runtime.transform(table, mappings))
    }

    /// Transform a table and validate the rows against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowLimitExceeded`] before any transformation when the
    /// table is over the configured row cap.
    pub fn run(
        &mut self,
        table: &Table,
        mappings: &[ColumnMapping],
        schema: &Schema,
    ) -> Result<PipelineOutput> {
        let start = Instant::now();
        let data = self.transform(table, mappings)?;
        debug!(rows = data.len(), "Transformation finished, validating");

        let validation_result = ValidationEngine::with_config(self.config.validation.clone())
            .validate(&data, schema, mappings);
        let report = ValidationReport::from_result(&validation_result, data.len());

        let elapsed = start.elapsed();
        self.stats.runs += 1;
        self.stats.rows_processed += report.total_rows;
        self.stats.rows_invalid += report.invalid_rows;
        self.stats.validation_errors += report.error_count;
        self.stats.total_processing_time += elapsed;

        info!(
            rows = report.total_rows,
            invalid_rows = report.invalid_rows,
            errors = report.error_count,
            elapsed_ms = elapsed.as_millis(),
            "Pipeline run complete"
        );

        Ok(PipelineOutput {
            data,
            validation_result,
            total_rows: report.total_rows,
            valid_rows: report.valid_rows,
            invalid_rows: report.invalid_rows,
        })
    }

    /// Read a seller file, then transform and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] when the file cannot be read, or any error
    /// from [`Pipeline::run`].
    pub fn run_file(
        &mut self,
        path: &Path,
        mapping: &MappingSet,
        template: &MarketplaceTemplate,
    ) -> Result<PipelineOutput> {
        let table = self.read_file(path)?;
        debug!(
            path = %path.display(),
            mapping = %mapping.name,
            template = %template.name,
            "Running pipeline on file"
        );
        self.run(&table, mapping.mappings(), template.schema())
    }

    fn check_row_limit(&self, table: &Table) -> Result<()> {
        match self.config.max_rows {
            Some(max_rows) if table.row_count() > max_rows => Err(Error::RowLimitExceeded {
                rows: table.row_count(),
                max_rows,
            }),
            _ => Ok(()),
        }
    }
}
