use chrono::NaiveDateTime;
use tutorbook_core::{
    models::date::format_date,
    roster::{Roster, ScheduledLesson},
};

/// Lessons starting within `window` of `now`, earliest first.
pub fn upcoming_lessons(
    roster: &Roster,
    now: NaiveDateTime,
    window: chrono::Duration,
) -> Vec<ScheduledLesson> {
    roster.upcoming(now, window)
}

pub fn format_reminder(lesson: &ScheduledLesson) -> String {
    let kind = if lesson.is_recurring { "" } else { " (make-up)" };
    format!(
        "{} {} {}: {} with {}{}",
        lesson.date.format("%a"),
        format_date(lesson.date),
        lesson.time_range,
        lesson.subject,
        lesson.person_name,
        kind
    )
}
