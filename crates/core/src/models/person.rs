use std::collections::BTreeSet;

use uuid::Uuid;

use crate::errors::{TutorError, TutorResult};
use crate::models::lesson::Lesson;
use crate::models::money::Money;

pub const MESSAGE_NAME_CONSTRAINTS: &str = "Names should not be blank";

/// A student and the lessons booked for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tags: BTreeSet<String>,
    pub lessons: Vec<Lesson>,
}

impl Person {
    pub fn new(name: &str) -> TutorResult<Self> {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: Uuid, name: &str) -> TutorResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TutorError::validation(MESSAGE_NAME_CONSTRAINTS));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            phone: None,
            email: None,
            address: None,
            tags: BTreeSet::new(),
            lessons: Vec::new(),
        })
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the lessons, keeping them in chronological order.
    pub fn with_lessons(mut self, mut lessons: Vec<Lesson>) -> Self {
        lessons.sort_by(Lesson::schedule_cmp);
        self.lessons = lessons;
        self
    }

    pub fn lesson(&self, index: usize) -> TutorResult<&Lesson> {
        self.lessons
            .get(index)
            .ok_or_else(|| TutorError::NotFound(format!("lesson {} of {}", index + 1, self.name)))
    }

    /// Whether `lesson` clashes with any of this person's lessons other than `ignore`.
    pub fn has_clashing_lesson(&self, lesson: &Lesson, ignore: Option<&Lesson>) -> bool {
        self.lessons
            .iter()
            .filter(|existing| ignore != Some(*existing))
            .any(|existing| existing.is_clashing(lesson))
    }

    pub fn outstanding_fees(&self) -> TutorResult<Money> {
        self.lessons
            .iter()
            .try_fold(Money::ZERO, |total, lesson| total.checked_add(lesson.outstanding_fees()))
    }
}
