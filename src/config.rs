//! Run configuration.
//!
//! A [`Config`] names the input log, the three output artifacts, which columns
//! hold the timestamp and the address, and how timestamps are rendered as
//! calendar dates. It is passed explicitly into every stage of the pipeline.
//!
//! Configuration is assembled from two layers of [`PartialConfig`]:
//!
//! 1. a TOML file (`config.toml` by default)
//! 2. command-line overrides
//!
//! and then [resolved](PartialConfig::resolve) into a complete [`Config`],
//! failing fast if a required key is absent.
//!
//! # Example
//!
//! ```rust
//! use smsfilter::config::{Config, PartialConfig};
//!
//! # fn main() -> smsfilter::Result<()> {
//! let file = PartialConfig::from_toml_str(r#"
//!     input_file_path = "sms.csv"
//!     output_file_path = "output.csv"
//!     unsorted_file_path = "unsorted_info.csv"
//!     statistics_file_path = "statistics.json"
//!     date_column_index = 4
//!     address_column_index = 2
//!     date_format = "%Y-%m-%d"
//! "#, "config.toml")?;
//!
//! let flags = PartialConfig {
//!     date_column_index: Some(3),
//!     ..PartialConfig::default()
//! };
//!
//! let config = file.overlay(flags).resolve()?;
//! assert_eq!(config.date_column_index, 3);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::core::timestamp;
use crate::error::{Result, SmsFilterError};

/// Configuration file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Which wall clock epoch timestamps are converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The host's local time zone (default).
    #[default]
    Local,

    /// Coordinated Universal Time.
    Utc,
}

impl fmt::Display for TimeZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneMode::Local => write!(f, "local"),
            TimeZoneMode::Utc => write!(f, "UTC"),
        }
    }
}

/// Complete configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV log to read.
    pub input_file_path: PathBuf,

    /// Filtered, time-sorted CSV artifact.
    pub output_file_path: PathBuf,

    /// Unfiltered CSV artifact in file order.
    pub unsorted_file_path: PathBuf,

    /// Per-user statistics JSON artifact.
    pub statistics_file_path: PathBuf,

    /// Zero-based column holding the epoch-millisecond timestamp.
    pub date_column_index: usize,

    /// Zero-based column holding the user address.
    pub address_column_index: usize,

    /// strftime-style format used for the selectable date labels.
    pub date_format: String,

    /// Wall clock used when converting timestamps (default: local).
    pub timezone: TimeZoneMode,
}

impl Config {
    /// Creates a configuration for `input` with the conventional SMS-export
    /// layout (`type,id,address,date,body`) and default artifact names.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input_file_path: input.into(),
            output_file_path: PathBuf::from("output.csv"),
            unsorted_file_path: PathBuf::from("unsorted_info.csv"),
            statistics_file_path: PathBuf::from("statistics.json"),
            date_column_index: 3,
            address_column_index: 2,
            date_format: "%Y-%m-%d".to_string(),
            timezone: TimeZoneMode::Local,
        }
    }

    /// Sets the filtered output path.
    #[must_use]
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file_path = path.into();
        self
    }

    /// Sets the unsorted output path.
    #[must_use]
    pub fn with_unsorted_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.unsorted_file_path = path.into();
        self
    }

    /// Sets the statistics output path.
    #[must_use]
    pub fn with_statistics_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.statistics_file_path = path.into();
        self
    }

    /// Sets the timestamp column.
    #[must_use]
    pub fn with_date_column(mut self, index: usize) -> Self {
        self.date_column_index = index;
        self
    }

    /// Sets the address column.
    #[must_use]
    pub fn with_address_column(mut self, index: usize) -> Self {
        self.address_column_index = index;
        self
    }

    /// Sets the date label format.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Sets the wall clock used for timestamp conversion.
    #[must_use]
    pub fn with_timezone(mut self, timezone: TimeZoneMode) -> Self {
        self.timezone = timezone;
        self
    }

    /// Loads configuration from a TOML file and applies `overrides` on top.
    ///
    /// When `path` is `None`, [`DEFAULT_CONFIG_FILE`] is read if it exists;
    /// its absence is not an error as long as `overrides` supplies every
    /// required key. A named file that cannot be read is an error.
    pub fn load(path: Option<&Path>, overrides: PartialConfig) -> Result<Self> {
        let file = match path {
            Some(path) => PartialConfig::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    PartialConfig::from_file(default)?
                } else {
                    tracing::debug!("no {} in working directory", DEFAULT_CONFIG_FILE);
                    PartialConfig::default()
                }
            }
        };

        file.overlay(overrides).resolve()
    }

    /// Checks that the configuration can drive a run.
    ///
    /// The date format must contain only known specifiers and must round-trip:
    /// a label it renders has to parse back to the same calendar day, otherwise
    /// the selectable dates could never be turned into ranges.
    pub fn validate(&self) -> Result<()> {
        if self.date_format.trim().is_empty() {
            return Err(SmsFilterError::invalid_config(
                "date_format",
                "must not be empty",
            ));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(SmsFilterError::invalid_config(
                "date_format",
                format!("'{}' contains an unknown specifier", self.date_format),
            ));
        }

        let sample = sample_instant();
        let label = timestamp::format_date_label(sample, &self.date_format)?;
        match timestamp::parse_date_label(&label, &self.date_format) {
            Ok(parsed) if parsed.date() == sample.date() => Ok(()),
            _ => Err(SmsFilterError::invalid_config(
                "date_format",
                format!(
                    "'{}' must identify a calendar day (rendered '{}' could not be read back)",
                    self.date_format, label
                ),
            )),
        }
    }
}

fn sample_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 11, 14)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// A configuration layer where every key is optional.
///
/// Both the TOML file and the command line produce one of these; later
/// layers win key-by-key via [`overlay`](Self::overlay).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    pub input_file_path: Option<PathBuf>,
    pub output_file_path: Option<PathBuf>,
    pub unsorted_file_path: Option<PathBuf>,
    pub statistics_file_path: Option<PathBuf>,
    pub date_column_index: Option<usize>,
    pub address_column_index: Option<usize>,
    pub date_format: Option<String>,
    pub timezone: Option<TimeZoneMode>,
}

impl PartialConfig {
    /// Reads a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }

    /// Parses TOML text; `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: impl AsRef<Path>) -> Result<Self> {
        toml::from_str(content).map_err(|source| SmsFilterError::ConfigParse {
            path: origin.as_ref().to_path_buf(),
            source,
        })
    }

    /// Returns `self` with every key set in `other` replaced.
    #[must_use]
    pub fn overlay(self, other: PartialConfig) -> Self {
        Self {
            input_file_path: other.input_file_path.or(self.input_file_path),
            output_file_path: other.output_file_path.or(self.output_file_path),
            unsorted_file_path: other.unsorted_file_path.or(self.unsorted_file_path),
            statistics_file_path: other.statistics_file_path.or(self.statistics_file_path),
            date_column_index: other.date_column_index.or(self.date_column_index),
            address_column_index: other.address_column_index.or(self.address_column_index),
            date_format: other.date_format.or(self.date_format),
            timezone: other.timezone.or(self.timezone),
        }
    }

    /// Builds a validated [`Config`].
    ///
    /// # Errors
    ///
    /// [`SmsFilterError::MissingConfig`] names the first absent required key;
    /// [`SmsFilterError::InvalidConfig`] reports a key that fails validation.
    pub fn resolve(self) -> Result<Config> {
        let config = Config {
            input_file_path: require(self.input_file_path, "input_file_path")?,
            output_file_path: require(self.output_file_path, "output_file_path")?,
            unsorted_file_path: require(self.unsorted_file_path, "unsorted_file_path")?,
            statistics_file_path: require(self.statistics_file_path, "statistics_file_path")?,
            date_column_index: require(self.date_column_index, "date_column_index")?,
            address_column_index: require(self.address_column_index, "address_column_index")?,
            date_format: require(self.date_format, "date_format")?,
            timezone: self.timezone.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

fn require<T>(value: Option<T>, key: &'static str) -> Result<T> {
    value.ok_or_else(|| SmsFilterError::missing_config(key))
}
