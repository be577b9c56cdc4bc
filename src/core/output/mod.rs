//! Output artifact writers.
//!
//! A run produces three artifacts:
//! - the filtered CSV ([`write_filtered_csv`]): matching records, time-sorted
//! - the unsorted CSV ([`write_unsorted_csv`]): every loaded record, file order
//! - the statistics JSON ([`write_statistics_json`]): per-user counts and dates
//!
//! [`write_artifacts`] creates all three files before writing any of them.

mod csv_writer;
mod json_writer;

use std::fs::File;
use std::io::BufWriter;

pub use csv_writer::{
    HEADER, NO_DATA_PLACEHOLDER, to_filtered_csv, write_filtered_csv, write_unsorted_csv,
};
pub use json_writer::{to_statistics_json, write_statistics_json};

use crate::config::Config;
use crate::core::filter::Aggregation;
use crate::core::models::Record;
use crate::error::Result;

/// Writes the three artifacts to the paths named in `config`.
pub fn write_artifacts(
    records: &[Record],
    aggregation: &Aggregation<'_>,
    config: &Config,
) -> Result<()> {
    let output = BufWriter::new(File::create(&config.output_file_path)?);
    let unsorted = BufWriter::new(File::create(&config.unsorted_file_path)?);
    let statistics = BufWriter::new(File::create(&config.statistics_file_path)?);

    write_filtered_csv(output, &aggregation.filtered)?;
    write_unsorted_csv(unsorted, records)?;
    write_statistics_json(statistics, &aggregation.statistics)?;

    tracing::info!(
        output = %config.output_file_path.display(),
        unsorted = %config.unsorted_file_path.display(),
        statistics = %config.statistics_file_path.display(),
        "artifacts written"
    );
    Ok(())
}
