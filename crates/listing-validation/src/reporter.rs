//! Validation reporter

use crate::engine::ValidationResult;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

/// Row-level summary of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    /// Distinct rows with at least one error
    pub invalid_rows: usize,
    pub error_count: usize,
    pub is_valid: bool,
    /// Error count per marketplace attribute
    pub errors_by_field: BTreeMap<String, usize>,
}

impl ValidationReport {
    /// Summarize a result over `total_rows` transformed rows
    pub fn from_result(result: &ValidationResult, total_rows: usize) -> Self {
        let invalid_rows = result
            .errors
            .iter()
            .filter_map(|e| e.row)
            .collect::<BTreeSet<_>>()
            .len()
            .min(total_rows);

        let mut errors_by_field = BTreeMap::new();
        for error in &result.errors {
            *errors_by_field.entry(error.field.clone()).or_insert(0) += 1;
        }

        Self {
            total_rows,
            valid_rows: total_rows - invalid_rows,
            invalid_rows,
            error_count: result.errors.len(),
            is_valid: result.is_valid,
            errors_by_field,
        }
    }
}

/// Renders validation results for people
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationReporter;

impl ValidationReporter {
    /// Create a new validation reporter
    pub fn new() -> Self {
        Self
    }

    /// Plain-text report: a summary line, one line per error, then warnings.
    pub fn render_text(&self, result: &ValidationResult, report: &ValidationReport) -> String {
        let mut out = String::new();
        if report.is_valid {
            let _ = writeln!(out, "Validation passed: {} rows valid", report.total_rows);
        } else {
            let _ = writeln!(
                out,
                "Validation failed: {} of {} rows invalid, {} errors",
                report.invalid_rows, report.total_rows, report.error_count
            );
        }

        for error in &result.errors {
            match error.row {
                Some(row) => {
                    let _ = writeln!(out, "row {row}: {}: {}", error.field, error.message);
                }
                None => {
                    let _ = writeln!(out, "{}: {}", error.field, error.message);
                }
            }
        }

        for warning in &result.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }
        out
    }
}
