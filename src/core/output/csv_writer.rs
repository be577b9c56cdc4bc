//! CSV artifact writer.

use std::io::Write;

use crate::core::models::Record;
use crate::error::Result;

/// Header written to both CSV artifacts.
pub const HEADER: [&str; 5] = ["type", "id", "address", "date", "body"];

/// Single-column row written in place of an empty filtered body.
pub const NO_DATA_PLACEHOLDER: &str =
    "No data found for the selected user(s) in the chosen time range(s)";

/// Writes the filtered artifact.
///
/// # Format
/// - Delimiter: `,`, CRLF line endings
/// - First row: [`HEADER`]
/// - One row per record with the timestamp column rendered as
///   `YYYY-MM-DD HH:MM:SS`; every other column is copied as read
/// - If `records` is empty, a single [`NO_DATA_PLACEHOLDER`] row follows the header
pub fn write_filtered_csv<W: Write>(writer: W, records: &[&Record]) -> Result<()> {
    let mut writer = csv_writer(writer);
    writer.write_record(HEADER)?;

    if records.is_empty() {
        writer.write_record([NO_DATA_PLACEHOLDER])?;
    }

    for record in records {
        writer.write_record(record.rendered_fields())?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the unsorted artifact: every loaded record in file order, rendered
/// the same way as the filtered artifact but without the placeholder row.
pub fn write_unsorted_csv<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut writer = csv_writer(writer);
    writer.write_record(HEADER)?;

    for record in records {
        writer.write_record(record.rendered_fields())?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts filtered records to a CSV string.
pub fn to_filtered_csv(records: &[&Record]) -> Result<String> {
    let mut buffer = Vec::new();
    write_filtered_csv(&mut buffer, records)?;
    Ok(String::from_utf8(buffer)?)
}

// Rows may be longer than the header and the placeholder row is shorter.
fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer)
}
