//! # Fee Accrual
//!
//! On every launch the outstanding fees of each lesson grow by the cost of the
//! occurrences held since the previous launch.
//!
//! An occurrence is billable when its end instant lies in the billing window
//! `(last_updated, now]`. The window is open at `last_updated` because an
//! occurrence ending exactly then was billed by the previous launch, and closed
//! at `now` because the next launch will start its window there. Consecutive
//! launches therefore bill every occurrence exactly once.

use chrono::{Days, NaiveDateTime, NaiveTime};

use crate::errors::{TutorError, TutorResult};
use crate::models::date::DateRange;
use crate::models::last_updated::{LastUpdated, truncate_to_minute};
use crate::models::lesson::Lesson;
use crate::models::money::Money;
use crate::models::person::Person;
use crate::models::time_range::TimeRange;

/// Hourly `rates` prorated over the minutes in `time_range`, truncated to the cent.
pub fn cost_per_lesson(time_range: &TimeRange, rates: Money) -> TutorResult<Money> {
    rates.per_minutes(time_range.duration_minutes())
}

/// Outstanding fees left after `payment`. Paying more than is owed is rejected outright.
pub fn pay(outstanding: Money, payment: Money) -> TutorResult<Money> {
    outstanding
        .checked_sub(payment)
        .ok_or(TutorError::Overpayment)
}

/// Result of accruing fees for every person at launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accrual {
    pub persons: Vec<Person>,
    pub last_updated: LastUpdated,
    pub lessons_billed: u64,
    pub total_accrued: Money,
}

#[derive(Debug, Clone, Copy)]
pub struct FeesCalculator {
    last_updated: NaiveDateTime,
    now: NaiveDateTime,
}

impl FeesCalculator {
    pub fn new(last_updated: LastUpdated, now: NaiveDateTime) -> Self {
        Self {
            last_updated: last_updated.date_time(),
            now: truncate_to_minute(now),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Dates whose occurrence, ending at `end_time`, finishes inside the billing window.
    fn billing_dates(&self, end_time: NaiveTime) -> Option<DateRange> {
        if self.now <= self.last_updated {
            return None;
        }

        let first = if self.last_updated.time() < end_time {
            self.last_updated.date()
        } else {
            self.last_updated.date().checked_add_days(Days::new(1))?
        };
        let last = if self.now.time() >= end_time {
            self.now.date()
        } else {
            self.now.date().checked_sub_days(Days::new(1))?
        };

        DateRange::new(first, Some(last)).ok()
    }

    /// Number of uncancelled occurrences of `lesson` that ended within the billing window.
    pub fn lessons_since_last_update(&self, lesson: &Lesson) -> u64 {
        let Some(window) = self
            .billing_dates(lesson.time_range().end())
            .and_then(|dates| dates.intersect(&lesson.date_range()))
        else {
            return 0;
        };

        let total = window.count_weekday(lesson.day_of_week()).unwrap_or(0);
        let cancelled = lesson
            .cancelled_dates()
            .iter()
            .filter(|date| window.contains(**date) && lesson.is_occurrence(**date))
            .count() as u64;

        debug_assert!(cancelled <= total, "more cancellations than occurrences");
        total.saturating_sub(cancelled)
    }

    /// Returns `lesson` with the fees of its newly held occurrences added.
    pub fn update_lesson(&self, lesson: &Lesson) -> TutorResult<Lesson> {
        let count = self.lessons_since_last_update(lesson);
        if count == 0 {
            return Ok(lesson.clone());
        }
        let accrued = lesson.cost_per_lesson()?.times(count)?;
        let updated = lesson.outstanding_fees().checked_add(accrued)?;
        Ok(lesson.clone().with_outstanding_fees(updated))
    }

    pub fn update_person(&self, person: &Person) -> TutorResult<Person> {
        let lessons = person
            .lessons
            .iter()
            .map(|lesson| self.update_lesson(lesson))
            .collect::<TutorResult<Vec<_>>>()?;
        Ok(person.clone().with_lessons(lessons))
    }

    pub fn update_all(&self, persons: &[Person]) -> TutorResult<Vec<Person>> {
        persons.iter().map(|person| self.update_person(person)).collect()
    }
}

/// Accrues fees for every lesson held since `last_updated` and advances the
/// timestamp to `now`.
///
/// Without a previous timestamp nothing is billed. If the clock is behind the
/// stored timestamp nothing is billed and the timestamp is kept, so it never
/// moves backwards.
pub fn accrue(
    persons: &[Person],
    last_updated: Option<LastUpdated>,
    now: NaiveDateTime,
) -> TutorResult<Accrual> {
    let now_stamp = LastUpdated::new(now);
    let Some(last_updated) = last_updated else {
        return Ok(Accrual {
            persons: persons.to_vec(),
            last_updated: now_stamp,
            lessons_billed: 0,
            total_accrued: Money::ZERO,
        });
    };

    if now_stamp <= last_updated {
        return Ok(Accrual {
            persons: persons.to_vec(),
            last_updated,
            lessons_billed: 0,
            total_accrued: Money::ZERO,
        });
    }

    let calculator = FeesCalculator::new(last_updated, now);
    let mut lessons_billed = 0;
    let mut total_accrued = Money::ZERO;
    for lesson in persons.iter().flat_map(|person| person.lessons.iter()) {
        let count = calculator.lessons_since_last_update(lesson);
        lessons_billed += count;
        total_accrued = total_accrued.checked_add(lesson.cost_per_lesson()?.times(count)?)?;
    }

    Ok(Accrual {
        persons: calculator.update_all(persons)?,
        last_updated: now_stamp,
        lessons_billed,
        total_accrued,
    })
}
