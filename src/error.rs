//! Custom error types for bizdash
//!
//! Two layers, both built with thiserror:
//!
//! - [`ValidationError`] describes a single rejected field of a single record.
//!   A rejected record carries every failing field in [`ValidationErrors`].
//! - [`FinanceError`] is the crate-wide error for everything that aborts an
//!   operation: schema mismatches, I/O, configuration, invalid policies.
//!
//! Business outcomes such as a negative net cushion or zero income are never
//! errors; they are ordinary computed values.

use std::fmt;

use thiserror::Error;

use crate::models::policy::PolicyError;

/// A single field-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank
    #[error("{field} is required")]
    MissingRequiredField { field: &'static str },

    /// Amount was non-numeric, negative or above `Money::MAX_PARSED`
    #[error("{field} must be a non-negative number up to 1000000000000, got '{value}'")]
    InvalidAmount { field: &'static str, value: String },

    /// Date did not parse under the accepted format
    #[error("{field} must be a date in {format} format, got '{value}'")]
    InvalidDate {
        field: &'static str,
        value: String,
        format: String,
    },

    /// Invoice due date precedes the sent date
    #[error("Due Date ({due}) must not be before Invoice Sent ({sent})")]
    InvalidDateRange { sent: String, due: String },

    /// Value did not match any recognized variant
    #[error("{field} '{value}' is not one of: {}", .expected.join(", "))]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        expected: Vec<&'static str>,
    },

    /// The CSV row itself could not be read
    #[error("Malformed row: {message}")]
    MalformedRow { message: String },
}

impl ValidationError {
    /// Name of the offending field, if the failure is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequiredField { field }
            | Self::InvalidAmount { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::InvalidEnumValue { field, .. } => Some(*field),
            Self::InvalidDateRange { .. } => Some("Due Date"),
            Self::MalformedRow { .. } => None,
        }
    }
}

/// Every validation failure found in one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Names of the offending fields, in the order they were checked
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().filter_map(ValidationError::field).collect()
    }

    /// Whether any failure matches the predicate
    pub fn any(&self, f: impl Fn(&ValidationError) -> bool) -> bool {
        self.0.iter().any(f)
    }

    /// Turn an accumulated set into a result
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// The main error type for bizdash operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reader/writer errors outside of per-row validation
    #[error("CSV error: {0}")]
    Csv(String),

    /// A single record failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The import file's columns do not match the record schema
    #[error("{kind} CSV schema mismatch (missing: [{}], unexpected: [{}])", .missing.join(", "), .unexpected.join(", "))]
    SchemaMismatch {
        kind: &'static str,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Allocation policy parameters are out of range
    #[error("Invalid allocation policy: {0}")]
    Policy(#[from] PolicyError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinanceError {
    /// Check if this is a schema mismatch
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Columns reported missing by a schema mismatch
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::SchemaMismatch { missing, .. } => missing.as_slice(),
            _ => &[],
        }
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for bizdash operations
pub type FinanceResult<T> = Result<T, FinanceError>;
