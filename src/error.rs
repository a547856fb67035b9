//! Error types for catalog loading and request parsing.
//!
//! The scorer itself never fails. Errors only arise when reference data is
//! loaded (`CatalogError`) or when a raw request is turned into an
//! `InputSample` (`InputError`).

use crate::catalog::{ParameterRange, Quantity};
use std::path::PathBuf;
use thiserror::Error;

/// Data-integrity problems in a crop catalog or weight table
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("crop '{crop}': {quantity} range {range:?} is invalid: {reason}")]
    InvalidRange {
        crop: String,
        quantity: Quantity,
        range: ParameterRange,
        reason: &'static str,
    },

    #[error("crop '{crop}': soil multiplier for '{soil}' is {value}, expected a value in [0, 1]")]
    InvalidSoilMultiplier {
        crop: String,
        soil: String,
        value: f64,
    },

    #[error("crop '{crop}': soil label '{soil}' is listed more than once")]
    DuplicateSoilLabel { crop: String, soil: String },

    #[error("crop name must not be empty")]
    EmptyName,

    #[error("duplicate crop name '{0}'")]
    DuplicateCrop(String),

    #[error("crop catalog is empty")]
    Empty,

    #[error("invalid feature weights: {0}")]
    InvalidWeights(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Validation failure for a single request field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("missing required field '{field}'")]
    Missing { field: &'static str },

    #[error("field '{field}' is not a number: '{value}'")]
    Malformed { field: &'static str, value: String },

    #[error("field '{field}' must be a finite number")]
    NonFinite { field: &'static str },

    #[error("field '{field}' must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("field '{field}' must be a string, got {value}")]
    NotText { field: &'static str, value: String },
}

impl InputError {
    /// Name of the offending field (wire key, e.g. "N" or "ph")
    pub fn field(&self) -> &'static str {
        match self {
            InputError::Missing { field }
            | InputError::Malformed { field, .. }
            | InputError::NonFinite { field }
            | InputError::NotPositive { field, .. }
            | InputError::NotText { field, .. } => field,
        }
    }
}
