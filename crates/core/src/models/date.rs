//! Lesson dates and closed date ranges.
//!
//! [`DateRange`] is the set arithmetic behind clash detection and fee accrual:
//! intersect two ranges, then count how many times a weekday falls inside.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::errors::{TutorError, TutorResult};

pub const MESSAGE_CONSTRAINTS: &str = "Dates should be of the format dd MMM yyyy \
    and adhere to the following constraints:\n\
    1. dd and yyyy are numerical characters.\n\
    2. MMM are alphabetical characters. e.g. Jan, Feb, ..., Dec\n\
    3. Must be a valid date for the year.";

const DISPLAY_FORMAT: &str = "%-d %b %Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses `d MMM yyyy` (month name is case-insensitive) or ISO `yyyy-mm-dd`.
pub fn parse_date(value: &str) -> TutorResult<NaiveDate> {
    let value = value.trim();
    let mut parts = value.split_whitespace();
    if let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    {
        let well_formed = (1..=2).contains(&day.len())
            && day.bytes().all(|b| b.is_ascii_digit())
            && month.len() == 3
            && month.bytes().all(|b| b.is_ascii_alphabetic())
            && year.len() == 4
            && year.bytes().all(|b| b.is_ascii_digit());
        if well_formed {
            return NaiveDate::parse_from_str(&format!("{day} {month} {year}"), "%d %b %Y")
                .map_err(|_| TutorError::validation(MESSAGE_CONSTRAINTS));
        }
        return Err(TutorError::validation(MESSAGE_CONSTRAINTS));
    }

    NaiveDate::parse_from_str(value, ISO_FORMAT)
        .map_err(|_| TutorError::validation(MESSAGE_CONSTRAINTS))
}

/// Formats a date the way lesson dates are shown to the tutor, e.g. `12 OCT 2021`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string().to_uppercase()
}

/// The first date on or after `date` that falls on `weekday`.
pub fn next_or_same(date: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let offset = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(u64::from(offset)))
}

/// The Monday starting the week that contains `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

/// A closed range of dates. A missing end means the range never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> TutorResult<Self> {
        if matches!(end, Some(end) if end < start) {
            return Err(TutorError::validation(
                "End date cannot be earlier than start date.",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: Some(date),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_bounded(&self) -> bool {
        self.end.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end.is_none_or(|end| date <= end)
    }

    /// The dates both ranges share, if any.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        DateRange::new(start, end).ok()
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.intersect(other).is_some()
    }

    /// Number of dates in the range falling on `weekday`, or `None` when the
    /// range is unbounded.
    pub fn count_weekday(&self, weekday: Weekday) -> Option<u64> {
        let end = self.end?;
        match next_or_same(self.start, weekday) {
            Some(first) if first <= end => Some((end - first).num_days() as u64 / 7 + 1),
            _ => Some(0),
        }
    }

    /// Every date in the range falling on `weekday`, in order.
    pub fn weekdays(&self, weekday: Weekday) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        let first = next_or_same(self.start, weekday);
        std::iter::successors(first, |date| date.checked_add_days(Days::new(7)))
            .take_while(move |date| end.is_none_or(|end| *date <= end))
    }
}
