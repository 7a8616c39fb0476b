#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # listing-pipeline
//!
//! Read, transform and validate orchestration for seller listing files.
//!
//! A [`Pipeline`] reads a seller table, applies a mapping set and validates
//! the transformed rows against a marketplace template, returning both the
//! rows and the validation outcome.

pub mod pipeline;

pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput, PipelineStats};

use thiserror::Error;

/// Errors that can occur in the pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Failed to read input '{path}': {message}")]
    Input { path: String, message: String },

    #[error("Input has {rows} rows, more than the limit of {max_rows}")]
    RowLimitExceeded { rows: usize, max_rows: usize },
}

impl Error {
    /// Create an input error with path context.
    pub fn input(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_preserves_path_context() {
        let error = Error::input("/tmp/sellers.csv", "Unsupported file type: /tmp/sellers.csv");
        match &error {
            Error::Input { path, message } => {
                assert_eq!(path, "/tmp/sellers.csv");
                assert!(message.starts_with("Unsupported file type"));
            }
            Error::RowLimitExceeded { .. } => panic!("expected input variant"),
        }
        assert!(error.to_string().starts_with("Failed to read input '/tmp/sellers.csv'"));
    }

    #[test]
    fn row_limit_message() {
        let error = Error::RowLimitExceeded {
            rows: 12,
            max_rows: 10,
        };
        assert_eq!(
            error.to_string(),
            "Input has 12 rows, more than the limit of 10"
        );
    }
}
