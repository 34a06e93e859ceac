//! Custom error types for Finbot
//!
//! Two layers: [`ParseError`] covers malformed user input and is always
//! recovered locally with a usage reply, while [`FinbotError`] carries the
//! failures that abort a request (storage, configuration, export).

use thiserror::Error;

/// Errors produced while interpreting a chat message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Message was empty or whitespace only
    #[error("empty input")]
    Empty,

    /// Amount token is not a finite number
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Amount parsed but is negative and negatives are not allowed
    #[error("negative amount not allowed: {0}")]
    NegativeAmount(String),

    /// Wrong number of whitespace-separated tokens
    #[error("expected {expected} tokens, found {found}")]
    WrongTokenCount { expected: &'static str, found: usize },

    /// First token of a shorthand entry is neither `income` nor `expense`
    #[error("unknown entry type: {0}")]
    UnknownEntryType(String),
}

/// The main error type for Finbot operations
#[derive(Error, Debug)]
pub enum FinbotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Ledger storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// User input could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Session store errors
    #[error("Session error: {0}")]
    Session(String),
}

impl FinbotError {
    /// Check if this error came from user input rather than the system
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this error is a rejected value, such as an out-of-range total
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the storage medium
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Storage(_) | Self::Json(_))
    }
}

impl From<std::io::Error> for FinbotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinbotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Finbot operations
pub type FinbotResult<T> = Result<T, FinbotError>;
