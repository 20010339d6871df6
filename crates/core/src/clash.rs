//! # Lesson Clash Detection
//!
//! Decides whether the occurrences of two lessons ever coincide.
//!
//! - Two make-up lessons clash when they fall on the same date and their
//!   time ranges overlap.
//! - A make-up lesson clashes with a recurring lesson when its date is one of
//!   the recurring lesson's active (non-cancelled) occurrences and the time
//!   ranges overlap.
//! - Two recurring lessons clash when they share a weekday, their time ranges
//!   overlap, and their shared date range still holds at least one date that
//!   neither lesson has cancelled.
//!
//! The last rule is set arithmetic: intersect the two date ranges, count the
//! weekday's occurrences in the intersection, and compare that against the
//! number of distinct cancelled dates inside it. An unbounded intersection has
//! infinitely many occurrences and only finitely many cancellations, so it
//! always clashes.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::lesson::Lesson;

pub fn lessons_clash(a: &Lesson, b: &Lesson) -> bool {
    if !a.time_range().is_clashing(&b.time_range()) {
        return false;
    }

    match (a.is_recurring(), b.is_recurring()) {
        (false, false) => {
            a.start_date() == b.start_date()
                && a.has_active_occurrence_on(a.start_date())
                && b.has_active_occurrence_on(b.start_date())
        }
        (false, true) => make_up_clashes_with_recurring(a, b),
        (true, false) => make_up_clashes_with_recurring(b, a),
        (true, true) => recurring_lessons_clash(a, b),
    }
}

fn make_up_clashes_with_recurring(make_up: &Lesson, recurring: &Lesson) -> bool {
    let date = make_up.start_date();
    make_up.has_active_occurrence_on(date) && recurring.has_active_occurrence_on(date)
}

fn recurring_lessons_clash(a: &Lesson, b: &Lesson) -> bool {
    if a.day_of_week() != b.day_of_week() {
        return false;
    }

    let Some(overlap) = a.date_range().intersect(&b.date_range()) else {
        return false;
    };

    let Some(total) = overlap.count_weekday(a.day_of_week()) else {
        return true;
    };

    let cancelled: BTreeSet<NaiveDate> = a
        .cancelled_dates()
        .iter()
        .chain(b.cancelled_dates())
        .copied()
        .filter(|date| overlap.contains(*date) && a.is_occurrence(*date))
        .collect();

    total > cancelled.len() as u64
}
