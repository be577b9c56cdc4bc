//! JSON statistics writer.
//!
//! Non-ASCII text is written as raw UTF-8, not as `\uXXXX` escapes.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::models::UserStatistics;
use crate::error::Result;

/// One entry of the statistics artifact.
#[derive(Serialize)]
struct JsonUserStatistics<'a> {
    #[serde(rename = "User")]
    user: &'a str,
    #[serde(rename = "Interactions")]
    interactions: usize,
    #[serde(rename = "Dates")]
    dates: Vec<&'a str>,
}

impl<'a> JsonUserStatistics<'a> {
    fn from_statistics(stats: &'a UserStatistics) -> Self {
        Self {
            user: &stats.user,
            interactions: stats.interactions,
            dates: stats.dates.iter().map(|i| i.timestamp.as_str()).collect(),
        }
    }
}

/// Writes statistics as a JSON array indented by four spaces.
///
/// # Format
/// ```json
/// [
///     {
///         "User": "alice",
///         "Interactions": 2,
///         "Dates": [
///             "2023-11-14 22:13:20",
///             "2023-11-20 17:06:40"
///         ]
///     }
/// ]
/// ```
///
/// An empty statistics list is written as `[]`.
pub fn write_statistics_json<W: Write>(writer: W, statistics: &[UserStatistics]) -> Result<()> {
    let entries: Vec<JsonUserStatistics<'_>> = statistics
        .iter()
        .map(JsonUserStatistics::from_statistics)
        .collect();

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(writer, formatter);
    entries.serialize(&mut serializer)?;
    serializer.into_inner().flush()?;
    Ok(())
}

/// Converts statistics to a JSON string.
///
/// Same format as [`write_statistics_json`], returned instead of written.
pub fn to_statistics_json(statistics: &[UserStatistics]) -> Result<String> {
    let mut buffer = Vec::new();
    write_statistics_json(&mut buffer, statistics)?;
    Ok(String::from_utf8(buffer)?)
}
