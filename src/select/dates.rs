//! Date range selection.
//!
//! The selectable dates are the distinct calendar labels present in the log,
//! rendered with the configured date format and sorted lexicographically.
//! The operator then picks one or more inclusive ranges over that list.
//!
//! # Protocol
//!
//! | Start answer | Effect |
//! |--------------|--------|
//! | blank | the whole span is selected and selection ends at once |
//! | `q` | selection ends with the ranges collected so far |
//! | `1..=N` | an end index is asked for |
//! | anything else | `Invalid input. Please try again.` |
//!
//! An end index must also be in `1..=N`; its day is closed at 23:59:59. An
//! invalid end discards the pair and asks for a start again.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use chrono::NaiveDateTime;

use crate::console::Console;
use crate::core::models::{DateRange, Record};
use crate::core::timestamp;
use crate::error::{Result, SmsFilterError};

const START_PROMPT: &str = "Choose a start date (enter the corresponding number) or press the enter button for all time ranges, or 'q' to finish: ";
const END_PROMPT: &str = "Choose an end date (enter the corresponding number): ";
const INVALID_INPUT: &str = "Invalid input. Please try again.";

/// Distinct date labels with their parsed start-of-label instants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateMenu {
    labels: Vec<String>,
    instants: Vec<NaiveDateTime>,
}

impl DateMenu {
    /// Builds the menu from loaded records.
    ///
    /// # Errors
    ///
    /// Returns [`SmsFilterError::InvalidDate`] if a rendered label does not
    /// parse back with `format`. [`Config::validate`](crate::config::Config::validate)
    /// rules this out for validated configurations.
    pub fn from_records(records: &[Record], format: &str) -> Result<Self> {
        let labels = distinct_dates(records, format)?;
        let instants = labels
            .iter()
            .map(|label| timestamp::parse_date_label(label, format))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels, instants })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Range between two 0-based menu positions, the end closed at 23:59:59.
    ///
    /// Returns `None` if either position is outside the menu.
    pub fn range(&self, start: usize, end: usize) -> Option<DateRange> {
        let start = *self.instants.get(start)?;
        let end = *self.instants.get(end)?;
        Some(DateRange::new(start, timestamp::end_of_day(end)))
    }

    /// Range from the earliest to the latest listed day.
    ///
    /// Labels sort as strings, so the bounds are taken from the parsed
    /// instants rather than the first and last labels.
    pub fn full_span(&self) -> Option<DateRange> {
        let start = *self.instants.iter().min()?;
        let end = *self.instants.iter().max()?;
        Some(DateRange::new(start, timestamp::end_of_day(end)))
    }
}

/// Distinct date labels, deduplicated and sorted as strings.
pub fn distinct_dates(records: &[Record], format: &str) -> Result<Vec<String>> {
    let mut labels = BTreeSet::new();
    for record in records {
        labels.insert(timestamp::format_date_label(record.sent_at(), format)?);
    }
    Ok(labels.into_iter().collect())
}

/// A parsed answer to the start prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    /// Blank: take the whole span.
    AllDates,
    /// `q`: stop collecting.
    Finish,
    /// A 0-based menu position.
    Index(usize),
    Invalid,
}

/// Interprets an answer to the start prompt against a menu of `len` dates.
pub fn parse_start_choice(input: &str, len: usize) -> StartChoice {
    let input = input.trim();
    if input.is_empty() {
        return StartChoice::AllDates;
    }
    if input.eq_ignore_ascii_case("q") {
        return StartChoice::Finish;
    }
    parse_index(input, len).map_or(StartChoice::Invalid, StartChoice::Index)
}

/// Interprets an answer to the end prompt; `None` if it is not in `1..=len`.
pub fn parse_end_choice(input: &str, len: usize) -> Option<usize> {
    parse_index(input.trim(), len)
}

/// Digits only, 1-based, converted to a 0-based position.
fn parse_index(input: &str, len: usize) -> Option<usize> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = input.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Runs the date range dialogue.
///
/// Returns the collected ranges in selection order; the result is empty if
/// the operator finished without choosing any.
///
/// # Errors
///
/// [`SmsFilterError::InputClosed`] if input ends before the operator finishes.
pub fn select_date_ranges<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    menu: &DateMenu,
) -> Result<Vec<DateRange>> {
    let mut ranges = Vec::new();
    console.list("Available time ranges:", menu.labels())?;

    loop {
        let answer = console
            .ask(START_PROMPT)?
            .ok_or_else(|| SmsFilterError::input_closed("date range"))?;

        let start = match parse_start_choice(&answer, menu.len()) {
            StartChoice::Finish => break,
            StartChoice::AllDates => {
                ranges = menu.full_span().into_iter().collect();
                console.say("All time ranges selected.")?;
                break;
            }
            StartChoice::Index(start) => start,
            StartChoice::Invalid => {
                console.say(INVALID_INPUT)?;
                continue;
            }
        };

        let answer = console
            .ask(END_PROMPT)?
            .ok_or_else(|| SmsFilterError::input_closed("date range"))?;

        match parse_end_choice(&answer, menu.len()).and_then(|end| menu.range(start, end)) {
            Some(range) => {
                console.say(format!("Selected time range: {range}"))?;
                ranges.push(range);
            }
            None => console.say(INVALID_INPUT)?,
        }
    }

    tracing::debug!(count = ranges.len(), "date ranges selected");
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, TimeZoneMode};
    use crate::core::reader::read_records;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn at(m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    // 2023-11-14, 2023-11-20, 2023-11-26 (UTC), listed out of order with a duplicate day.
    fn records() -> Vec<Record> {
        let data = "type,id,address,date,body\n\
                    1,1,alice,1701000000000,c\n\
                    1,2,alice,1700000000000,a\n\
                    1,3,bob,1700500000000,b\n\
                    1,4,bob,1700000001000,a2\n";
        let config = Config::new("unused").with_timezone(TimeZoneMode::Utc);
        read_records(data.as_bytes(), &config).unwrap().records
    }

    fn menu() -> DateMenu {
        DateMenu::from_records(&records(), "%Y-%m-%d").unwrap()
    }

    fn run(input: &str) -> (Result<Vec<DateRange>>, String) {
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        let result = select_date_ranges(&mut console, &menu());
        let (_, out) = console.into_parts();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_distinct_dates_sorted_and_deduplicated() {
        assert_eq!(
            distinct_dates(&records(), "%Y-%m-%d").unwrap(),
            vec!["2023-11-14", "2023-11-20", "2023-11-26"]
        );
    }

    #[test]
    fn test_distinct_dates_custom_format() {
        assert_eq!(
            distinct_dates(&records(), "%d.%m.%Y").unwrap(),
            vec!["14.11.2023", "20.11.2023", "26.11.2023"]
        );
    }

    #[test]
    fn test_menu_ranges() {
        let menu = menu();
        assert_eq!(menu.len(), 3);
        assert_eq!(
            menu.range(0, 1),
            Some(DateRange::new(at(11, 14, 0, 0, 0), at(11, 20, 23, 59, 59)))
        );
        assert_eq!(menu.range(0, 3), None);
        assert_eq!(
            menu.full_span(),
            Some(DateRange::new(at(11, 14, 0, 0, 0), at(11, 26, 23, 59, 59)))
        );
        assert_eq!(DateMenu::default().full_span(), None);
    }

    #[test]
    fn test_full_span_across_month_boundary() {
        // 2023-11-30 22:40:00 and 2023-12-01 00:00:00 (UTC)
        let data = "1,1,alice,1701384000000,a\n1,2,bob,1701388800000,b\n";
        let config = Config::new("unused").with_timezone(TimeZoneMode::Utc);
        let records = read_records(data.as_bytes(), &config).unwrap().records;
        let menu = DateMenu::from_records(&records, "%d.%m.%Y").unwrap();

        assert_eq!(menu.labels(), ["01.12.2023", "30.11.2023"]);
        let span = menu.full_span().unwrap();
        assert_eq!(span, DateRange::new(at(11, 30, 0, 0, 0), at(12, 1, 23, 59, 59)));
        assert!(records.iter().all(|r| span.contains(r.sent_at())));
    }

    #[test]
    fn test_parse_start_choice() {
        assert_eq!(parse_start_choice("", 3), StartChoice::AllDates);
        assert_eq!(parse_start_choice("q", 3), StartChoice::Finish);
        assert_eq!(parse_start_choice("Q", 3), StartChoice::Finish);
        assert_eq!(parse_start_choice("1", 3), StartChoice::Index(0));
        assert_eq!(parse_start_choice("03", 3), StartChoice::Index(2));
        assert_eq!(parse_start_choice("0", 3), StartChoice::Invalid);
        assert_eq!(parse_start_choice("4", 3), StartChoice::Invalid);
        assert_eq!(parse_start_choice("-1", 3), StartChoice::Invalid);
        assert_eq!(parse_start_choice("one", 3), StartChoice::Invalid);
        assert_eq!(
            parse_start_choice("99999999999999999999999", 3),
            StartChoice::Invalid
        );
    }

    #[test]
    fn test_parse_end_choice() {
        assert_eq!(parse_end_choice("2", 3), Some(1));
        assert_eq!(parse_end_choice("", 3), None);
        assert_eq!(parse_end_choice("q", 3), None);
        assert_eq!(parse_end_choice("4", 3), None);
    }

    #[test]
    fn test_blank_selects_full_span() {
        let (ranges, out) = run("\n");
        assert_eq!(
            ranges.unwrap(),
            vec![DateRange::new(at(11, 14, 0, 0, 0), at(11, 26, 23, 59, 59))]
        );
        assert!(out.starts_with("Available time ranges:\n1. 2023-11-14\n2. 2023-11-20\n3. 2023-11-26\n"));
        assert!(out.contains("All time ranges selected."));
    }

    #[test]
    fn test_blank_discards_earlier_ranges() {
        let ranges = run("1\n1\n\n").0.unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end, at(11, 26, 23, 59, 59));
    }

    #[test]
    fn test_multiple_ranges_then_quit() {
        let (ranges, out) = run("1\n1\n3\n3\nq\n");
        assert_eq!(
            ranges.unwrap(),
            vec![
                DateRange::new(at(11, 14, 0, 0, 0), at(11, 14, 23, 59, 59)),
                DateRange::new(at(11, 26, 0, 0, 0), at(11, 26, 23, 59, 59)),
            ]
        );
        assert!(out.contains("Selected time range: 2023-11-14 00:00:00 to 2023-11-14 23:59:59"));
    }

    #[test]
    fn test_quit_immediately_yields_no_ranges() {
        let (ranges, _) = run("q\n");
        assert!(ranges.unwrap().is_empty());
    }

    #[test]
    fn test_invalid_end_discards_pair() {
        let (ranges, out) = run("1\n9\n2\n3\nq\n");
        assert_eq!(
            ranges.unwrap(),
            vec![DateRange::new(at(11, 20, 0, 0, 0), at(11, 26, 23, 59, 59))]
        );
        assert_eq!(out.matches(INVALID_INPUT).count(), 1);
    }

    #[test]
    fn test_invalid_start_reprompts() {
        let (ranges, out) = run("x\n0\nq\n");
        assert!(ranges.unwrap().is_empty());
        assert_eq!(out.matches(INVALID_INPUT).count(), 2);
    }

    #[test]
    fn test_eof_is_input_closed() {
        let (ranges, _) = run("1\n");
        assert!(ranges.unwrap_err().is_input_closed());
    }
}
