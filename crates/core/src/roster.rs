//! # Roster
//!
//! The tutor's list of students. Lessons across the whole roster never clash:
//! adding or editing a lesson that would overlap any other lesson is rejected.
//! The roster also answers the schedule questions the tutor asks of it: what
//! is on today, what is on this week, and what is coming up soon.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{TutorError, TutorResult};
use crate::models::date::{DateRange, week_start};
use crate::models::lesson::Lesson;
use crate::models::money::Money;
use crate::models::person::Person;
use crate::models::time_range::TimeRange;

pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the roster";

/// One occurrence of a lesson on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledLesson {
    pub person_id: Uuid,
    pub person_name: String,
    pub subject: String,
    pub date: NaiveDate,
    pub time_range: TimeRange,
    pub is_recurring: bool,
}

impl ScheduledLesson {
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time_range.start())
    }

    pub fn end(&self) -> NaiveDateTime {
        self.date.and_time(self.time_range.end())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    persons: Vec<Person>,
}

impl Roster {
    /// Builds a roster, rejecting it if any two lessons clash.
    pub fn new(persons: Vec<Person>) -> TutorResult<Self> {
        let mut roster = Self::default();
        for person in persons {
            roster.add_person(person)?;
        }
        Ok(roster)
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn into_persons(self) -> Vec<Person> {
        self.persons
    }

    pub fn person(&self, id: Uuid) -> TutorResult<&Person> {
        self.persons
            .iter()
            .find(|person| person.id == id)
            .ok_or_else(|| TutorError::NotFound(format!("person {id}")))
    }

    fn person_mut(&mut self, id: Uuid) -> TutorResult<&mut Person> {
        self.persons
            .iter_mut()
            .find(|person| person.id == id)
            .ok_or_else(|| TutorError::NotFound(format!("person {id}")))
    }

    pub fn add_person(&mut self, mut person: Person) -> TutorResult<()> {
        if self.persons.iter().any(|existing| existing.id == person.id) {
            return Err(TutorError::validation(MESSAGE_DUPLICATE_PERSON));
        }
        for (i, lesson) in person.lessons.iter().enumerate() {
            let clashes_with_own = person.lessons[..i]
                .iter()
                .any(|earlier| earlier.is_clashing(lesson));
            if clashes_with_own || self.has_clashing_lesson(lesson, None) {
                return Err(TutorError::ClashingLesson);
            }
        }
        let lessons = std::mem::take(&mut person.lessons);
        self.persons.push(person.with_lessons(lessons));
        Ok(())
    }

    pub fn remove_person(&mut self, id: Uuid) -> TutorResult<Person> {
        let index = self
            .persons
            .iter()
            .position(|person| person.id == id)
            .ok_or_else(|| TutorError::NotFound(format!("person {id}")))?;
        Ok(self.persons.remove(index))
    }

    /// Whether `lesson` clashes with any lesson in the roster other than `ignore`.
    pub fn has_clashing_lesson(&self, lesson: &Lesson, ignore: Option<&Lesson>) -> bool {
        self.persons
            .iter()
            .any(|person| person.has_clashing_lesson(lesson, ignore))
    }

    pub fn add_lesson(&mut self, person_id: Uuid, lesson: Lesson) -> TutorResult<()> {
        if self.has_clashing_lesson(&lesson, None) {
            return Err(TutorError::ClashingLesson);
        }
        let person = self.person_mut(person_id)?;
        person.lessons.push(lesson);
        person.lessons.sort_by(Lesson::schedule_cmp);
        Ok(())
    }

    /// Replaces the lesson at `index`; the replaced lesson is ignored when checking for clashes.
    pub fn edit_lesson(&mut self, person_id: Uuid, index: usize, lesson: Lesson) -> TutorResult<()> {
        let existing = self.person(person_id)?.lesson(index)?.clone();
        if self.has_clashing_lesson(&lesson, Some(&existing)) {
            return Err(TutorError::ClashingLesson);
        }
        self.replace_lesson(person_id, index, lesson)
    }

    pub fn delete_lesson(&mut self, person_id: Uuid, index: usize) -> TutorResult<Lesson> {
        let person = self.person_mut(person_id)?;
        person.lesson(index)?;
        Ok(person.lessons.remove(index))
    }

    pub fn cancel_lesson_date(&mut self, person_id: Uuid, index: usize, date: NaiveDate) -> TutorResult<()> {
        let cancelled = self.person(person_id)?.lesson(index)?.cancel(date)?;
        self.replace_lesson(person_id, index, cancelled)
    }

    /// Restores a cancelled date, provided the restored occurrence clashes with nothing.
    pub fn uncancel_lesson_date(&mut self, person_id: Uuid, index: usize, date: NaiveDate) -> TutorResult<()> {
        let existing = self.person(person_id)?.lesson(index)?.clone();
        let restored = existing.uncancel(date)?;
        if self.has_clashing_lesson(&restored, Some(&existing)) {
            return Err(TutorError::ClashingLesson);
        }
        self.replace_lesson(person_id, index, restored)
    }

    /// Applies `payment` to one lesson and returns what is still owed on it.
    pub fn pay_lesson(&mut self, person_id: Uuid, index: usize, payment: Money) -> TutorResult<Money> {
        let paid = self.person(person_id)?.lesson(index)?.pay(payment)?;
        let remaining = paid.outstanding_fees();
        self.replace_lesson(person_id, index, paid)?;
        Ok(remaining)
    }

    fn replace_lesson(&mut self, person_id: Uuid, index: usize, lesson: Lesson) -> TutorResult<()> {
        let person = self.person_mut(person_id)?;
        person.lesson(index)?;
        person.lessons[index] = lesson;
        person.lessons.sort_by(Lesson::schedule_cmp);
        Ok(())
    }

    /// Every lesson occurrence within `range`, ordered by start.
    pub fn scheduled_between(&self, range: &DateRange) -> Vec<ScheduledLesson> {
        let mut scheduled: Vec<ScheduledLesson> = self
            .persons
            .iter()
            .flat_map(|person| {
                person.lessons.iter().flat_map(move |lesson| {
                    lesson
                        .active_occurrences(range)
                        .into_iter()
                        .map(move |date| ScheduledLesson {
                            person_id: person.id,
                            person_name: person.name.clone(),
                            subject: lesson.subject().to_string(),
                            date,
                            time_range: lesson.time_range(),
                            is_recurring: lesson.is_recurring(),
                        })
                })
            })
            .collect();
        scheduled.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.person_name.cmp(&b.person_name)));
        scheduled
    }

    pub fn lessons_on(&self, date: NaiveDate) -> Vec<ScheduledLesson> {
        self.scheduled_between(&DateRange::single(date))
    }

    /// Lessons in the Monday-to-Sunday week containing `date`.
    pub fn lessons_in_week(&self, date: NaiveDate) -> Vec<ScheduledLesson> {
        let monday = week_start(date);
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        match DateRange::new(monday, Some(sunday)) {
            Ok(week) => self.scheduled_between(&week),
            Err(_) => Vec::new(),
        }
    }

    /// Lessons starting between `now` and `now + window`, inclusive.
    /// A window reaching past the last representable instant stops there.
    pub fn upcoming(&self, now: NaiveDateTime, window: chrono::Duration) -> Vec<ScheduledLesson> {
        let until = now.checked_add_signed(window).unwrap_or(NaiveDateTime::MAX);
        let Ok(dates) = DateRange::new(now.date(), Some(until.date())) else {
            return Vec::new();
        };
        self.scheduled_between(&dates)
            .into_iter()
            .filter(|lesson| now <= lesson.start() && lesson.start() <= until)
            .collect()
    }

    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.persons.iter().flat_map(|person| person.tags.iter()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn total_outstanding_fees(&self) -> TutorResult<Money> {
        self.persons
            .iter()
            .try_fold(Money::ZERO, |total, person| total.checked_add(person.outstanding_fees()?))
    }
}
