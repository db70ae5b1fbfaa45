//! Errors for model fitting, table construction and configuration

use thiserror::Error;

/// Result of thermistor operations
pub type ThermistorResult<T> = Result<T, ThermistorError>;

/// Errors raised while building models, circuits and lookup tables
#[derive(Debug, Error)]
pub enum ThermistorError {
    /// Range bounds are not ordered or not finite
    #[error("Invalid temperature range: min {min} must be less than max {max}")]
    InvalidRange { min: f64, max: f64 },

    /// A table needs at least both endpoints
    #[error("A lookup table needs at least 2 datapoints, got {0}")]
    TooFewDatapoints(usize),

    /// Model or circuit parameter out of its domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Model or circuit produced NaN or infinity
    #[error("Non-finite table value at index {index} ({celsius} C)")]
    NonFiniteValue { index: usize, celsius: f64 },

    /// Computed value does not fit the table's storage type
    #[error("Value {value} at index {index} does not fit in {type_name}")]
    ValueOutOfRange {
        index: usize,
        value: f64,
        type_name: &'static str,
    },

    /// Two neighbouring entries are equal
    #[error(
        "The thermistor transfer function is over sampled and not able to distinguish \
         between some temperatures at index {index} (decrease number of datapoints)"
    )]
    OverSampled { index: usize },

    /// An entry is larger than its predecessor
    #[error("Table values must be in descending order (index {index})")]
    NotDescending { index: usize },

    /// Reference data does not line up with the table
    #[error("Size mismatch: table has {expected} entries, reference has {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Configuration document is malformed or inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
