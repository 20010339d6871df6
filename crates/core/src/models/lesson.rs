//! Lessons: weekly recurring lessons and one-off make-up lessons.
//!
//! A [`Lesson`] is immutable. Cancelling a date, paying fees or accruing new
//! fees all produce a new value.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::clash;
use crate::errors::{TutorError, TutorResult};
use crate::fees;
use crate::models::date::{DateRange, format_date};
use crate::models::money::Money;
use crate::models::time_range::TimeRange;

pub const MESSAGE_SUBJECT_CONSTRAINTS: &str = "Subject should not be blank";
pub const MESSAGE_INVALID_CANCEL_DATE: &str = "The date to cancel is not a date of this lesson.";
pub const MESSAGE_ALREADY_CANCELLED: &str = "The lesson on this date has already been cancelled.";
pub const MESSAGE_NOT_CANCELLED: &str = "The lesson on this date has not been cancelled.";

/// How often a lesson takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recurrence {
    /// Once, on the start date.
    MakeUp,
    /// Every week on the start date's weekday, up to and including `end_date`.
    Weekly { end_date: Option<NaiveDate> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    recurrence: Recurrence,
    start_date: NaiveDate,
    time_range: TimeRange,
    subject: String,
    rates: Money,
    outstanding_fees: Money,
    homework: BTreeSet<String>,
    cancelled_dates: BTreeSet<NaiveDate>,
}

impl Lesson {
    /// Creates a weekly lesson. `end_date` of `None` means it repeats indefinitely.
    pub fn recurring(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        time_range: TimeRange,
        subject: &str,
        rates: Money,
    ) -> TutorResult<Self> {
        DateRange::new(start_date, end_date)?;
        Self::build(Recurrence::Weekly { end_date }, start_date, time_range, subject, rates)
    }

    /// Creates a one-off make-up lesson.
    pub fn make_up(
        date: NaiveDate,
        time_range: TimeRange,
        subject: &str,
        rates: Money,
    ) -> TutorResult<Self> {
        Self::build(Recurrence::MakeUp, date, time_range, subject, rates)
    }

    fn build(
        recurrence: Recurrence,
        start_date: NaiveDate,
        time_range: TimeRange,
        subject: &str,
        rates: Money,
    ) -> TutorResult<Self> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(TutorError::validation(MESSAGE_SUBJECT_CONSTRAINTS));
        }
        Ok(Self {
            recurrence,
            start_date,
            time_range,
            subject: subject.to_string(),
            rates,
            outstanding_fees: Money::ZERO,
            homework: BTreeSet::new(),
            cancelled_dates: BTreeSet::new(),
        })
    }

    pub fn with_homework<I, S>(mut self, homework: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.homework = homework
            .into_iter()
            .map(Into::into)
            .filter(|h: &String| !h.trim().is_empty())
            .collect();
        self
    }

    pub fn with_outstanding_fees(mut self, outstanding_fees: Money) -> Self {
        self.outstanding_fees = outstanding_fees;
        self
    }

    /// Replaces the cancelled dates. Each one must be a date this lesson takes place on.
    pub fn with_cancelled_dates<I>(mut self, dates: I) -> TutorResult<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        if let Some(date) = dates.iter().find(|date| !self.is_occurrence(**date)) {
            return Err(TutorError::validation(format!(
                "{MESSAGE_INVALID_CANCEL_DATE} ({})",
                format_date(*date)
            )));
        }
        self.cancelled_dates = dates;
        Ok(self)
    }

    pub fn recurrence(&self) -> Recurrence {
        self.recurrence
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self.recurrence, Recurrence::Weekly { .. })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last date the lesson can take place on; `None` if it repeats indefinitely.
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.recurrence {
            Recurrence::MakeUp => Some(self.start_date),
            Recurrence::Weekly { end_date } => end_date,
        }
    }

    pub fn date_range(&self) -> DateRange {
        match self.recurrence {
            Recurrence::MakeUp => DateRange::single(self.start_date),
            Recurrence::Weekly { end_date } => DateRange::new(self.start_date, end_date)
                .unwrap_or_else(|_| DateRange::single(self.start_date)),
        }
    }

    pub fn day_of_week(&self) -> Weekday {
        self.start_date.weekday()
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn rates(&self) -> Money {
        self.rates
    }

    pub fn outstanding_fees(&self) -> Money {
        self.outstanding_fees
    }

    pub fn homework(&self) -> &BTreeSet<String> {
        &self.homework
    }

    pub fn cancelled_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.cancelled_dates
    }

    pub fn start_date_time(&self) -> NaiveDateTime {
        self.start_date.and_time(self.time_range.start())
    }

    pub fn end_date_time(&self) -> NaiveDateTime {
        self.start_date.and_time(self.time_range.end())
    }

    /// Whether the lesson is scheduled on `date`, cancelled or not.
    pub fn is_occurrence(&self, date: NaiveDate) -> bool {
        self.date_range().contains(date) && date.weekday() == self.day_of_week()
    }

    pub fn is_cancelled_on(&self, date: NaiveDate) -> bool {
        self.cancelled_dates.contains(&date)
    }

    /// Whether the lesson actually takes place on `date`.
    pub fn has_active_occurrence_on(&self, date: NaiveDate) -> bool {
        self.is_occurrence(date) && !self.is_cancelled_on(date)
    }

    /// Dates within `range` on which the lesson takes place, skipping cancellations.
    pub fn active_occurrences(&self, range: &DateRange) -> Vec<NaiveDate> {
        let Some(window) = self.date_range().intersect(range) else {
            return Vec::new();
        };
        if !window.is_bounded() {
            return Vec::new();
        }
        window
            .weekdays(self.day_of_week())
            .filter(|date| !self.is_cancelled_on(*date))
            .collect()
    }

    /// True when every occurrence has been cancelled. A lesson without an end
    /// date always has more occurrences, so it is never fully cancelled.
    pub fn is_cancelled(&self) -> bool {
        match self.date_range().count_weekday(self.day_of_week()) {
            Some(total) => {
                let cancelled = self
                    .cancelled_dates
                    .iter()
                    .filter(|date| self.is_occurrence(**date))
                    .count() as u64;
                cancelled >= total
            }
            None => false,
        }
    }

    pub fn has_started(&self, now: NaiveDateTime) -> bool {
        self.start_date_time() <= now
    }

    /// Whether the final occurrence has finished by `now`.
    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        match self.end_date() {
            Some(end) => end.and_time(self.time_range.end()) <= now,
            None => false,
        }
    }

    /// Hourly rate prorated over the lesson's duration.
    pub fn cost_per_lesson(&self) -> TutorResult<Money> {
        fees::cost_per_lesson(&self.time_range, self.rates)
    }

    pub fn cancel(&self, date: NaiveDate) -> TutorResult<Self> {
        if !self.is_occurrence(date) {
            return Err(TutorError::validation(MESSAGE_INVALID_CANCEL_DATE));
        }
        if self.is_cancelled_on(date) {
            return Err(TutorError::validation(MESSAGE_ALREADY_CANCELLED));
        }
        let mut lesson = self.clone();
        lesson.cancelled_dates.insert(date);
        Ok(lesson)
    }

    pub fn uncancel(&self, date: NaiveDate) -> TutorResult<Self> {
        if !self.is_cancelled_on(date) {
            return Err(TutorError::validation(MESSAGE_NOT_CANCELLED));
        }
        let mut lesson = self.clone();
        lesson.cancelled_dates.remove(&date);
        Ok(lesson)
    }

    /// Deducts `payment` from the outstanding fees.
    pub fn pay(&self, payment: Money) -> TutorResult<Self> {
        let remaining = fees::pay(self.outstanding_fees, payment)?;
        Ok(self.clone().with_outstanding_fees(remaining))
    }

    pub fn is_clashing(&self, other: &Lesson) -> bool {
        clash::lessons_clash(self, other)
    }

    /// Chronological order: start date, then start time.
    pub fn schedule_cmp(&self, other: &Lesson) -> Ordering {
        self.start_date
            .cmp(&other.start_date)
            .then_with(|| self.time_range.start().cmp(&other.time_range.start()))
            .then_with(|| self.time_range.end().cmp(&other.time_range.end()))
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_recurring() {
            "Recurring Lesson"
        } else {
            "Make-up Lesson"
        };
        write!(
            f,
            "{kind}: {} {} {} (rate {}/hr, outstanding {})",
            format_date(self.start_date),
            self.time_range,
            self.subject,
            self.rates,
            self.outstanding_fees
        )?;
        if let Recurrence::Weekly {
            end_date: Some(end_date),
        } = self.recurrence
        {
            write!(f, " until {}", format_date(end_date))?;
        }
        Ok(())
    }
}
