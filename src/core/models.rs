//! Core data models for interaction logs.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;

use super::timestamp;

/// One row of the input log.
///
/// The row's fields are kept positionally, exactly as read. The timestamp and
/// address columns are decoded once when the record is built, so a record
/// always carries a valid instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
    millis: i64,
    sent_at: NaiveDateTime,
    address_index: usize,
    date_index: usize,
}

impl Record {
    /// Creates a record from already-decoded parts.
    ///
    /// `date_index` and `address_index` must be valid indices into `fields`;
    /// [`reader`](super::reader) guarantees this for loaded records.
    pub fn new(
        fields: Vec<String>,
        millis: i64,
        sent_at: NaiveDateTime,
        date_index: usize,
        address_index: usize,
    ) -> Self {
        Self {
            fields,
            millis,
            sent_at,
            address_index,
            date_index,
        }
    }

    /// All fields of the row, in file order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Raw timestamp in epoch milliseconds.
    pub fn millis(&self) -> i64 {
        self.millis
    }

    /// Wall-clock instant of the interaction, to the second.
    pub fn sent_at(&self) -> NaiveDateTime {
        self.sent_at
    }

    /// The user address this interaction belongs to.
    pub fn address(&self) -> &str {
        self.fields
            .get(self.address_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The row with its timestamp column rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn rendered_fields(&self) -> Vec<String> {
        let mut fields = self.fields.clone();
        if let Some(cell) = fields.get_mut(self.date_index) {
            *cell = timestamp::format_timestamp(self.sent_at);
        }
        fields
    }
}

/// Inclusive pair of wall-clock instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `instant` lies within the range, bounds included.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The set of users to keep.
///
/// An empty selection means "every user"; it never has to enumerate them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSelection {
    users: BTreeSet<String>,
}

impl UserSelection {
    /// Selection matching every user.
    pub fn all() -> Self {
        Self::default()
    }

    /// Selection matching exactly the given users.
    pub fn of<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: users.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` for the match-all selection.
    pub fn is_all(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns `true` if `address` passes the selection.
    pub fn matches(&self, address: &str) -> bool {
        self.is_all() || self.users.contains(address)
    }

    /// Selected users in sorted order; empty for the match-all selection.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// One matched interaction in a user's statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// `YYYY-MM-DD HH:MM:SS` timestamp of the interaction.
    pub timestamp: String,
    /// Index of the first selected range containing the interaction.
    pub range_index: usize,
}

/// Per-user interaction summary.
///
/// `dates` is in file order, not re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatistics {
    pub user: String,
    pub interactions: usize,
    pub dates: Vec<Interaction>,
}

impl UserStatistics {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            interactions: 0,
            dates: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, timestamp: String, range_index: usize) {
        self.interactions += 1;
        self.dates.push(Interaction {
            timestamp,
            range_index,
        });
    }

    /// Timestamps attributed to the range at `range_index`.
    pub fn interactions_in_range(&self, range_index: usize) -> impl Iterator<Item = &str> {
        self.dates
            .iter()
            .filter(move |i| i.range_index == range_index)
            .map(|i| i.timestamp.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn record() -> Record {
        Record::new(
            vec![
                "1".into(),
                "7".into(),
                "alice".into(),
                "1700000000000".into(),
                "hi".into(),
            ],
            1700000000000,
            at(14, 22, 13, 20),
            3,
            2,
        )
    }

    #[test]
    fn test_record_accessors() {
        let r = record();
        assert_eq!(r.address(), "alice");
        assert_eq!(r.millis(), 1700000000000);
        assert_eq!(r.fields().len(), 5);
    }

    #[test]
    fn test_rendered_fields_replace_date_column_only() {
        let rendered = record().rendered_fields();
        assert_eq!(
            rendered,
            vec!["1", "7", "alice", "2023-11-14 22:13:20", "hi"]
        );
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let range = DateRange::new(at(14, 0, 0, 0), at(15, 23, 59, 59));
        assert!(range.contains(at(14, 0, 0, 0)));
        assert!(range.contains(at(15, 23, 59, 59)));
        assert!(!range.contains(at(13, 23, 59, 59)));
        assert!(!range.contains(at(16, 0, 0, 0)));
    }

    #[test]
    fn test_range_display() {
        let range = DateRange::new(at(14, 0, 0, 0), at(15, 23, 59, 59));
        assert_eq!(
            range.to_string(),
            "2023-11-14 00:00:00 to 2023-11-15 23:59:59"
        );
    }

    #[test]
    fn test_user_selection_all() {
        let all = UserSelection::all();
        assert!(all.is_all());
        assert!(all.matches("anyone"));
        assert_eq!(all.users().count(), 0);
    }

    #[test]
    fn test_user_selection_explicit() {
        let sel = UserSelection::of(["bob", "alice", "bob"]);
        assert!(!sel.is_all());
        assert_eq!(sel.len(), 2);
        assert!(sel.matches("alice"));
        assert!(!sel.matches("carol"));
        assert_eq!(sel.users().collect::<Vec<_>>(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_statistics_by_range() {
        let mut stats = UserStatistics::new("alice");
        stats.record("2023-11-14 10:00:00".into(), 0);
        stats.record("2023-11-20 10:00:00".into(), 1);
        stats.record("2023-11-14 11:00:00".into(), 0);

        assert_eq!(stats.interactions, 3);
        assert_eq!(
            stats.interactions_in_range(0).collect::<Vec<_>>(),
            vec!["2023-11-14 10:00:00", "2023-11-14 11:00:00"]
        );
        assert_eq!(stats.interactions_in_range(1).count(), 1);
    }
}
