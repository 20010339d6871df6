use chrono::NaiveDate;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use tutorbook_core::models::{
    date::{format_date, parse_date},
    last_updated::LastUpdated,
    lesson::{Lesson, Recurrence},
    money::Money,
    person::Person,
    time_range::TimeRange,
};
use uuid::Uuid;

fn missing_lesson_field(field: &str) -> eyre::Report {
    eyre!("Lesson's {} field is missing!", field)
}

fn missing_person_field(field: &str) -> eyre::Report {
    eyre!("Person's {} field is missing!", field)
}

/// Top level of `persons.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonRoster {
    #[serde(default)]
    pub persons: Vec<JsonPerson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPerson {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub lessons: Vec<JsonLesson>,
}

impl JsonPerson {
    pub fn from_model(person: &Person) -> Self {
        Self {
            id: Some(person.id),
            name: Some(person.name.clone()),
            phone: person.phone.clone(),
            email: person.email.clone(),
            address: person.address.clone(),
            tags: person.tags.iter().cloned().collect(),
            lessons: person.lessons.iter().map(JsonLesson::from_model).collect(),
        }
    }

    /// Records written before ids existed get a fresh one.
    pub fn to_model(&self) -> Result<Person> {
        let name = self.name.as_deref().ok_or_else(|| missing_person_field("Name"))?;
        let lessons = self
            .lessons
            .iter()
            .map(JsonLesson::to_model)
            .collect::<Result<Vec<_>>>()?;

        let mut person = Person::with_id(self.id.unwrap_or_else(Uuid::new_v4), name)?
            .with_tags(self.tags.iter().map(String::as_str))
            .with_lessons(lessons);
        person.phone = self.phone.clone();
        person.email = self.email.clone();
        person.address = self.address.clone();
        Ok(person)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLesson {
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub time_range: Option<String>,
    pub subject: Option<String>,
    pub lesson_rates: Option<String>,
    pub outstanding_fees: Option<String>,
    #[serde(default)]
    pub homework: Vec<String>,
    #[serde(default)]
    pub cancelled_dates: Vec<String>,
    pub is_recurring: Option<bool>,
}

impl JsonLesson {
    pub fn from_model(lesson: &Lesson) -> Self {
        let end_date = match lesson.recurrence() {
            Recurrence::Weekly { end_date } => end_date.map(format_date),
            Recurrence::MakeUp => None,
        };
        Self {
            date: Some(format_date(lesson.start_date())),
            end_date,
            time_range: Some(lesson.time_range().to_string()),
            subject: Some(lesson.subject().to_string()),
            lesson_rates: Some(lesson.rates().to_string()),
            outstanding_fees: Some(lesson.outstanding_fees().to_string()),
            homework: lesson.homework().iter().cloned().collect(),
            cancelled_dates: lesson.cancelled_dates().iter().copied().map(format_date).collect(),
            is_recurring: Some(lesson.is_recurring()),
        }
    }

    pub fn to_model(&self) -> Result<Lesson> {
        let date = parse_date(self.date.as_deref().ok_or_else(|| missing_lesson_field("Date"))?)?;
        let time_range: TimeRange = self
            .time_range
            .as_deref()
            .ok_or_else(|| missing_lesson_field("TimeRange"))?
            .parse()?;
        let subject = self.subject.as_deref().ok_or_else(|| missing_lesson_field("Subject"))?;
        let rates: Money = self
            .lesson_rates
            .as_deref()
            .ok_or_else(|| missing_lesson_field("LessonRates"))?
            .parse()?;
        let outstanding_fees: Money = self
            .outstanding_fees
            .as_deref()
            .ok_or_else(|| missing_lesson_field("OutstandingFees"))?
            .parse()?;
        let is_recurring = self.is_recurring.ok_or_else(|| missing_lesson_field("IsRecurring"))?;

        let lesson = if is_recurring {
            let end_date = self.end_date.as_deref().map(parse_date).transpose()?;
            Lesson::recurring(date, end_date, time_range, subject, rates)?
        } else {
            Lesson::make_up(date, time_range, subject, rates)?
        };

        let cancelled_dates = self
            .cancelled_dates
            .iter()
            .map(|value| parse_date(value))
            .collect::<Result<Vec<NaiveDate>, _>>()?;

        Ok(lesson
            .with_homework(self.homework.iter().map(String::as_str))
            .with_outstanding_fees(outstanding_fees)
            .with_cancelled_dates(cancelled_dates)?)
    }
}

/// Contents of `last_updated.json`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLastUpdated {
    pub last_updated: LastUpdated,
}
