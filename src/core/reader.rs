//! Load an interaction log from CSV.
//!
//! Rows are positional; no header is assumed. A row whose timestamp column
//! holds the literal `date` is treated as a header and skipped wherever it
//! appears. Rows that cannot be decoded are skipped with a diagnostic instead
//! of aborting the load.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use super::models::Record;
use super::timestamp;
use crate::config::Config;
use crate::error::Result;

/// Header token expected in the timestamp column.
pub const HEADER_TOKEN: &str = "date";

/// Why a row was left out of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowIssue {
    #[error("missing column {index} (row has {len} fields)")]
    MissingColumn { index: usize, len: usize },

    #[error("timestamp '{0}' is not an integer")]
    InvalidTimestamp(String),

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("column {index} is not valid UTF-8")]
    InvalidUtf8 { index: usize },
}

/// A row that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the input file.
    pub line: u64,
    pub issue: RowIssue,
}

/// Counts gathered while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows read from the file, headers and skipped rows included.
    pub rows_read: usize,
    /// Rows recognized as headers.
    pub header_rows: usize,
    /// Rows that could not be decoded.
    pub skipped: Vec<SkippedRow>,
}

/// Records loaded from one input file, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub report: LoadReport,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads the configured input file.
pub fn load_dataset(path: &Path, config: &Config) -> Result<Dataset> {
    let file = File::open(path)?;
    read_records(BufReader::new(file), config)
}

/// Reads records from any CSV source.
///
/// # Errors
///
/// Only malformed CSV (or an I/O failure) is an error; undecodable rows are
/// reported in [`LoadReport::skipped`].
pub fn read_records<R: Read>(reader: R, config: &Config) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut dataset = Dataset::default();

    for result in csv_reader.byte_records() {
        let row = result?;
        dataset.report.rows_read += 1;
        let line = row.position().map_or(0, |p| p.line());

        if row.get(config.date_column_index) == Some(HEADER_TOKEN.as_bytes()) {
            dataset.report.header_rows += 1;
            continue;
        }

        match decode_fields(&row).and_then(|fields| decode_row(fields, config)) {
            Ok(record) => dataset.records.push(record),
            Err(issue) => {
                tracing::warn!(line, %issue, "skipping row");
                dataset.report.skipped.push(SkippedRow { line, issue });
            }
        }
    }

    tracing::debug!(
        records = dataset.records.len(),
        headers = dataset.report.header_rows,
        skipped = dataset.report.skipped.len(),
        "loaded dataset"
    );

    Ok(dataset)
}

fn decode_fields(row: &csv::ByteRecord) -> std::result::Result<Vec<String>, RowIssue> {
    row.iter()
        .enumerate()
        .map(|(index, field)| {
            std::str::from_utf8(field)
                .map(str::to_string)
                .map_err(|_| RowIssue::InvalidUtf8 { index })
        })
        .collect()
}

/// Decodes one positional row into a [`Record`].
pub fn decode_row(fields: Vec<String>, config: &Config) -> std::result::Result<Record, RowIssue> {
    let len = fields.len();
    for index in [config.date_column_index, config.address_column_index] {
        if index >= len {
            return Err(RowIssue::MissingColumn { index, len });
        }
    }

    let raw = &fields[config.date_column_index];
    let millis =
        timestamp::parse_millis(raw).ok_or_else(|| RowIssue::InvalidTimestamp(raw.clone()))?;
    let sent_at = timestamp::millis_to_datetime(millis, config.timezone)
        .ok_or(RowIssue::TimestampOutOfRange(millis))?;

    Ok(Record::new(
        fields,
        millis,
        sent_at,
        config.date_column_index,
        config.address_column_index,
    ))
}
