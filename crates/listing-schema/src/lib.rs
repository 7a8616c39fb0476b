//! # listing-schema
//!
//! Marketplace attribute schemas, template model and loader.
//!
//! A marketplace template names the attributes a listing must carry, each
//! with a declared type and optional constraints. Templates persisted as JSON
//! may hold untyped records; [`AttributeEntry::normalize`] turns those into
//! typed definitions on demand.

pub mod loader;
pub mod model;

pub use loader::TemplateLoader;
pub use model::{
    AttributeDefinition, AttributeEntry, AttributeType, MarketplaceTemplate, NumericBound, Schema,
};

use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid template format: {0}")]
    InvalidFormat(String),

    #[error("Invalid attribute definition '{name}': {message}")]
    InvalidAttribute { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an invalid-attribute error for a record that cannot be typed.
    pub fn invalid_attribute(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
