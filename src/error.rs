//! Error handling for NWIS retrieval and RDB processing.
//!
//! Provides error types with context for malformed service responses,
//! reshaping conflicts, configuration problems and transport failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NwisError {
    #[error("Service unavailable: {body}")]
    ServiceUnavailable { body: String },

    #[error("Malformed RDB response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Ragged row at data line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid statistics configuration: {message}")]
    InvalidStatConfiguration { message: String },

    #[error("Required column '{column}' not found in RDB table")]
    MissingColumn { column: String },

    #[error("Invalid date/time in column '{column}': '{value}'")]
    InvalidDateTime { column: String, value: String },

    #[error("Duplicate entry for index '{index}' in column '{column}', cannot reshape")]
    DuplicateEntry { index: String, column: String },

    #[error("No field measurements available for site {site}; some states post none to NWIS")]
    NoMeasurements { site: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl NwisError {
    /// Create a malformed response error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create an invalid statistics configuration error
    pub fn invalid_stat(message: impl Into<String>) -> Self {
        Self::InvalidStatConfiguration {
            message: message.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NwisError>;
