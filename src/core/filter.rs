//! Filter records by date ranges and users, and build per-user statistics.
//!
//! A record is kept when its instant lies in at least one selected
//! [`DateRange`] (bounds included) and its address passes the
//! [`UserSelection`]. Kept records are sorted by raw timestamp; statistics
//! follow file order.
//!
//! # Example
//!
//! ```
//! use smsfilter::config::{Config, TimeZoneMode};
//! use smsfilter::core::filter::aggregate;
//! use smsfilter::core::models::{DateRange, UserSelection};
//! use smsfilter::core::reader::read_records;
//! use chrono::NaiveDate;
//!
//! # fn main() -> smsfilter::Result<()> {
//! let config = Config::new("sms.csv").with_timezone(TimeZoneMode::Utc);
//! let data = "1,1,alice,1700500000000,later\n1,2,alice,1700000000000,first\n";
//! let dataset = read_records(data.as_bytes(), &config)?;
//!
//! let day = NaiveDate::from_ymd_opt(2023, 11, 14).unwrap();
//! let range = DateRange::new(
//!     day.and_hms_opt(0, 0, 0).unwrap(),
//!     day.and_hms_opt(23, 59, 59).unwrap(),
//! );
//!
//! let result = aggregate(&dataset.records, &[range], &UserSelection::all());
//! assert_eq!(result.filtered.len(), 1);
//! assert_eq!(result.statistics[0].user, "alice");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::models::{DateRange, Record, UserSelection, UserStatistics};
use super::timestamp;

/// Outcome of filtering one dataset.
#[derive(Debug, Clone, Default)]
pub struct Aggregation<'a> {
    /// Matching records, ascending by raw timestamp.
    pub filtered: Vec<&'a Record>,
    /// One entry per matching user, in first-match order.
    pub statistics: Vec<UserStatistics>,
}

impl Aggregation<'_> {
    /// Sum of all per-user interaction counts.
    pub fn total_interactions(&self) -> usize {
        self.statistics.iter().map(|s| s.interactions).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// Index of the first range (in selection order) containing `instant`.
pub fn first_matching_range(ranges: &[DateRange], instant: NaiveDateTime) -> Option<usize> {
    ranges.iter().position(|range| range.contains(instant))
}

/// Returns `true` if `record` passes both filters.
pub fn matches(record: &Record, ranges: &[DateRange], users: &UserSelection) -> bool {
    users.matches(record.address()) && first_matching_range(ranges, record.sent_at()).is_some()
}

/// Applies the filters to `records` and accumulates statistics.
pub fn aggregate<'a>(
    records: &'a [Record],
    ranges: &[DateRange],
    users: &UserSelection,
) -> Aggregation<'a> {
    let mut filtered = Vec::new();
    let mut statistics: Vec<UserStatistics> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        if !users.matches(record.address()) {
            continue;
        }
        let Some(range_index) = first_matching_range(ranges, record.sent_at()) else {
            continue;
        };

        filtered.push(record);

        let position = *positions.entry(record.address()).or_insert_with(|| {
            statistics.push(UserStatistics::new(record.address()));
            statistics.len() - 1
        });
        statistics[position].record(timestamp::format_timestamp(record.sent_at()), range_index);
    }

    filtered.sort_by_key(|record| record.millis());

    tracing::debug!(
        matched = filtered.len(),
        users = statistics.len(),
        "aggregated records"
    );

    Aggregation {
        filtered,
        statistics,
    }
}
