#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tutorbook_core::models::{
    date::parse_date, last_updated::LastUpdated, lesson::Lesson, money::Money, person::Person,
};

pub fn date(value: &str) -> NaiveDate {
    parse_date(value).expect("valid date")
}

pub fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid date time")
}

pub fn stamp(value: &str) -> LastUpdated {
    LastUpdated::new(at(value))
}

/// Weekly Mathematics lesson at 50.00 an hour.
pub fn weekly(start: &str, time: &str) -> Lesson {
    Lesson::recurring(
        date(start),
        None,
        time.parse().expect("valid time range"),
        "Mathematics",
        Money::from_cents(5000),
    )
    .expect("valid lesson")
}

pub fn make_up(on: &str, time: &str) -> Lesson {
    Lesson::make_up(
        date(on),
        time.parse().expect("valid time range"),
        "Physics",
        Money::from_cents(4000),
    )
    .expect("valid lesson")
}

pub fn person(name: &str, lessons: Vec<Lesson>) -> Person {
    Person::new(name).expect("valid person").with_lessons(lessons)
}
