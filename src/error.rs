//! Unified error types for smsfilter.
//!
//! This module provides a single [`SmsFilterError`] enum that covers every
//! fatal condition in the library. Conditions that are recoverable at the
//! row or prompt level (a malformed timestamp, an out-of-range selection)
//! never surface here; they are reported and skipped or re-prompted locally.
//!
//! # Error Classes
//!
//! - **Configuration**: [`MissingConfig`](SmsFilterError::MissingConfig),
//!   [`InvalidConfig`](SmsFilterError::InvalidConfig),
//!   [`ConfigParse`](SmsFilterError::ConfigParse)
//! - **Dates**: [`InvalidDate`](SmsFilterError::InvalidDate)
//! - **Empty input**: [`NoDates`](SmsFilterError::NoDates),
//!   [`NoUsers`](SmsFilterError::NoUsers)
//! - **Operator**: [`InputClosed`](SmsFilterError::InputClosed)
//! - **I/O**: [`Io`](SmsFilterError::Io), [`Csv`](SmsFilterError::Csv),
//!   [`Json`](SmsFilterError::Json), [`Utf8`](SmsFilterError::Utf8)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for smsfilter operations.
///
/// # Example
///
/// ```rust
/// use smsfilter::error::Result;
/// use smsfilter::core::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SmsFilterError>;

/// The error type for all smsfilter operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SmsFilterError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - An output directory is missing or not writable
    /// - The terminal could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Reading the input CSV or writing a CSV artifact failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serializing the statistics artifact failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when an in-memory artifact is converted to a string.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The configuration file is not valid TOML or has mistyped keys.
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        /// The configuration file that was read
        path: PathBuf,
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A required configuration key was not supplied by the file or the flags.
    #[error("Missing configuration key '{key}'")]
    MissingConfig {
        /// Name of the absent key
        key: &'static str,
    },

    /// A configuration key is present but unusable.
    #[error("Invalid configuration key '{key}': {message}")]
    InvalidConfig {
        /// Name of the offending key
        key: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// A date label could not be parsed with the configured date format.
    #[error("Invalid date '{input}'. Expected format: {format}")]
    InvalidDate {
        /// The date string that failed to parse
        input: String,
        /// The strftime-style format it was parsed with
        format: String,
    },

    /// The input contains no records with a usable timestamp.
    #[error("No available time ranges")]
    NoDates,

    /// The input contains no user identifiers.
    #[error("No available users")]
    NoUsers,

    /// The operator's input stream ended while a prompt was waiting.
    #[error("Input closed while waiting for {stage} selection")]
    InputClosed {
        /// The stage that was prompting ("date range", "user")
        stage: &'static str,
    },
}

impl From<std::string::FromUtf8Error> for SmsFilterError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        SmsFilterError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SmsFilterError {
    /// Creates a missing configuration key error.
    pub fn missing_config(key: &'static str) -> Self {
        SmsFilterError::MissingConfig { key }
    }

    /// Creates an invalid configuration key error.
    pub fn invalid_config(key: &'static str, message: impl Into<String>) -> Self {
        SmsFilterError::InvalidConfig {
            key,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>, format: impl Into<String>) -> Self {
        SmsFilterError::InvalidDate {
            input: input.into(),
            format: format.into(),
        }
    }

    /// Creates an input-closed error for the given prompt stage.
    pub fn input_closed(stage: &'static str) -> Self {
        SmsFilterError::InputClosed { stage }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SmsFilterError::Io(_))
    }

    /// Returns `true` if this error comes from configuration loading.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SmsFilterError::ConfigParse { .. }
                | SmsFilterError::MissingConfig { .. }
                | SmsFilterError::InvalidConfig { .. }
        )
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, SmsFilterError::InvalidDate { .. })
    }

    /// Returns `true` if the operator closed the input stream.
    pub fn is_input_closed(&self) -> bool {
        matches!(self, SmsFilterError::InputClosed { .. })
    }
}
