//! Core processing logic for smsfilter.
//!
//! This module contains:
//! - [`models`] - Records, date ranges, user selections and statistics
//! - [`timestamp`] - Epoch-millisecond conversion and rendering
//! - [`reader`] - CSV loading
//! - [`filter`] - Date/user filtering and statistics
//! - [`output`] - Artifact writers (CSV, JSON)
//! - [`processor`] - The interactive three-stage run
//!
//! # Quick Start
//!
//! ```rust
//! use smsfilter::core::{
//!     Record, DateRange, UserSelection,
//!     read_records, aggregate, write_artifacts,
//! };
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod processor;
pub mod reader;
pub mod timestamp;

// Re-export main types for convenience
pub use filter::{Aggregation, aggregate};
pub use models::{DateRange, Interaction, Record, UserSelection, UserStatistics};
pub use output::{to_filtered_csv, to_statistics_json, write_artifacts};
pub use processor::{RunSummary, process, run};
pub use reader::{Dataset, LoadReport, load_dataset, read_records};
