//! The three-stage run: date ranges, then users, then filter and write.
//!
//! Each stage feeds the next. Finishing the date dialogue without a range
//! starts it over; the user dialogue blocks until it gets a usable answer.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::filter::aggregate;
use super::models::{DateRange, UserSelection};
use super::output::write_artifacts;
use super::reader::{Dataset, LoadReport, load_dataset};
use crate::config::Config;
use crate::console::Console;
use crate::error::{Result, SmsFilterError};
use crate::select::dates::{DateMenu, select_date_ranges};
use crate::select::users::{distinct_users, select_users};

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub load: LoadReport,
    /// Records available to the filter.
    pub records: usize,
    /// Records written to the filtered artifact.
    pub matched: usize,
    /// Users present in the statistics artifact.
    pub users: usize,
    pub ranges: Vec<DateRange>,
    pub selection: UserSelection,
    pub output_file_path: PathBuf,
    pub unsorted_file_path: PathBuf,
    pub statistics_file_path: PathBuf,
}

impl RunSummary {
    /// Share of loaded records that matched, in percent.
    pub fn match_ratio(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        self.matched as f64 / self.records as f64 * 100.0
    }
}

/// Loads the configured input and runs every stage.
pub fn run<R: BufRead, W: Write>(config: &Config, console: &mut Console<R, W>) -> Result<RunSummary> {
    let dataset = load_dataset(&config.input_file_path, config)?;
    process(&dataset, config, console)
}

/// Runs every stage over an already loaded dataset.
///
/// # Errors
///
/// - [`SmsFilterError::NoDates`] / [`SmsFilterError::NoUsers`] if there is
///   nothing to select from (reported on the console first)
/// - [`SmsFilterError::InputClosed`] if the operator's input ends
/// - I/O, CSV and JSON errors from writing the artifacts
pub fn process<R: BufRead, W: Write>(
    dataset: &Dataset,
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<RunSummary> {
    let menu = DateMenu::from_records(&dataset.records, &config.date_format)?;
    if menu.is_empty() {
        console.say("No available time ranges.")?;
        return Err(SmsFilterError::NoDates);
    }

    let ranges = loop {
        let ranges = select_date_ranges(console, &menu)?;
        if !ranges.is_empty() {
            break ranges;
        }
        console.say("No valid time range selection. Please try again.")?;
    };
    console.list("Selected time range(s):", &ranges)?;

    let users = distinct_users(&dataset.records);
    if users.is_empty() {
        console.say("No available users.")?;
        return Err(SmsFilterError::NoUsers);
    }
    let selection = select_users(console, &users)?;

    let aggregation = aggregate(&dataset.records, &ranges, &selection);
    write_artifacts(&dataset.records, &aggregation, config)?;

    console.say(format!(
        "Filtered data has been written to {}.",
        config.output_file_path.display()
    ))?;
    console.say(format!(
        "Unsorted information has been written to {}.",
        config.unsorted_file_path.display()
    ))?;
    console.say(format!(
        "Statistics have been written to {}.",
        config.statistics_file_path.display()
    ))?;

    Ok(RunSummary {
        load: dataset.report.clone(),
        records: dataset.len(),
        matched: aggregation.filtered.len(),
        users: aggregation.statistics.len(),
        ranges,
        selection,
        output_file_path: config.output_file_path.clone(),
        unsorted_file_path: config.unsorted_file_path.clone(),
        statistics_file_path: config.statistics_file_path.clone(),
    })
}
