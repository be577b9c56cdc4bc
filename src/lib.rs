//! # smsfilter
//!
//! Filter timestamped interaction logs (SMS-style CSV exports) by date ranges
//! and users, and summarize interactions per user.
//!
//! ## Overview
//!
//! A run has three stages, each feeding the next:
//!
//! 1. **Date ranges**: the distinct dates in the log are listed and the
//!    operator picks one or more inclusive ranges
//! 2. **Users**: the distinct addresses are listed and the operator picks
//!    some of them, or all
//! 3. **Filter and write**: matching records are sorted by timestamp and
//!    written with two companion artifacts
//!
//! | Artifact | Content |
//! |----------|---------|
//! | filtered CSV | matching records, ascending by timestamp |
//! | unsorted CSV | every record, file order, unfiltered |
//! | statistics JSON | `{User, Interactions, Dates}` per matching user |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smsfilter::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = Config::new("sms.csv").with_timezone(TimeZoneMode::Utc);
//!     config.validate()?;
//!
//!     let mut console = Console::stdio();
//!     let summary = run(&config, &mut console)?;
//!     println!("{} of {} records matched", summary.matched, summary.records);
//!     Ok(())
//! }
//! ```
//!
//! ## Without a Terminal
//!
//! The filter itself needs no prompts:
//!
//! ```rust
//! use smsfilter::prelude::*;
//!
//! # fn main() -> smsfilter::Result<()> {
//! let config = Config::new("sms.csv").with_timezone(TimeZoneMode::Utc);
//! let dataset = read_records("1,1,alice,1700000000000,hi\n".as_bytes(), &config)?;
//!
//! let menu = DateMenu::from_records(&dataset.records, &config.date_format)?;
//! let everything = menu.full_span().into_iter().collect::<Vec<_>>();
//!
//! let result = aggregate(&dataset.records, &everything, &UserSelection::all());
//! assert_eq!(result.filtered.len(), 1);
//! assert_eq!(to_statistics_json(&result.statistics)?.matches("alice").count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - [`Config`](config::Config), TOML loading and validation
//! - [`core`] - records, filtering, statistics, artifact writers, the run
//! - [`select`] - the date range and user dialogues
//! - [`console`] - prompt I/O over any reader/writer pair
//! - [`error`] - [`SmsFilterError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod console;
pub mod core;
pub mod error;
pub mod select;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SmsFilterError};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use smsfilter::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{Result, SmsFilterError};

    // Configuration
    pub use crate::config::{Config, PartialConfig, TimeZoneMode};

    // Models
    pub use crate::core::models::{DateRange, Record, UserSelection, UserStatistics};

    // Loading
    pub use crate::core::reader::{Dataset, load_dataset, read_records};

    // Filtering
    pub use crate::core::filter::{Aggregation, aggregate};

    // Output
    pub use crate::core::output::{
        to_filtered_csv, to_statistics_json, write_artifacts, write_filtered_csv,
        write_statistics_json, write_unsorted_csv,
    };

    // Running
    pub use crate::console::Console;
    pub use crate::core::processor::{RunSummary, process, run};
    pub use crate::select::{DateMenu, distinct_users, select_date_ranges, select_users};
}
