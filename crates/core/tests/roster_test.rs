use chrono::{Duration, NaiveDate, NaiveDateTime};
use fake::{Fake, faker::name::en::Name};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tutorbook_core::{
    errors::TutorError,
    models::{date::parse_date, lesson::Lesson, money::Money, person::Person},
    roster::Roster,
};

fn date(value: &str) -> NaiveDate {
    parse_date(value).expect("valid date")
}

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").expect("valid date time")
}

fn weekly(start: &str, time: &str) -> Lesson {
    Lesson::recurring(date(start), None, time.parse().unwrap(), "Mathematics", Money::from_cents(5000))
        .expect("valid lesson")
}

fn make_up(on: &str, time: &str) -> Lesson {
    Lesson::make_up(date(on), time.parse().unwrap(), "Physics", Money::from_cents(4000))
        .expect("valid lesson")
}

fn student() -> Person {
    let name: String = Name().fake();
    Person::new(&name).expect("valid person")
}

#[test]
fn test_roster_rejects_clashing_lessons_across_persons() {
    let alex = student().with_lessons(vec![weekly("12 Oct 2021", "1400-1500")]);
    let bernice = student().with_lessons(vec![make_up("19 Oct 2021", "1430-1530")]);

    assert!(matches!(Roster::new(vec![alex, bernice]), Err(TutorError::ClashingLesson)));
}

#[test]
fn test_roster_rejects_duplicate_person() {
    let alex = student();
    let mut roster = Roster::new(vec![alex.clone()]).unwrap();

    assert!(matches!(roster.add_person(alex), Err(TutorError::Validation(_))));
}

#[test]
fn test_add_lesson() {
    let alex = student().with_lessons(vec![weekly("12 Oct 2021", "1400-1500")]);
    let bernice = student();
    let (alex_id, bernice_id) = (alex.id, bernice.id);
    let mut roster = Roster::new(vec![alex, bernice]).unwrap();

    assert!(matches!(
        roster.add_lesson(bernice_id, weekly("26 Oct 2021", "1500-1600")),
        Err(TutorError::ClashingLesson)
    ));
    roster.add_lesson(bernice_id, weekly("26 Oct 2021", "1501-1600")).unwrap();
    roster.add_lesson(alex_id, make_up("5 Oct 2021", "0900-1000")).unwrap();

    let alex = roster.person(alex_id).unwrap();
    assert_eq!(alex.lessons.len(), 2);
    // kept in date order
    assert_eq!(alex.lessons[0].start_date(), date("5 Oct 2021"));

    assert!(matches!(
        roster.add_lesson(uuid::Uuid::new_v4(), make_up("6 Oct 2021", "0900-1000")),
        Err(TutorError::NotFound(_))
    ));
}

#[test]
fn test_edit_lesson_ignores_the_lesson_being_replaced() {
    let alex = student().with_lessons(vec![weekly("12 Oct 2021", "1400-1500")]);
    let bernice = student().with_lessons(vec![weekly("13 Oct 2021", "1400-1500")]);
    let alex_id = alex.id;
    let mut roster = Roster::new(vec![alex, bernice]).unwrap();

    roster.edit_lesson(alex_id, 0, weekly("12 Oct 2021", "1430-1530")).unwrap();
    assert_eq!(
        roster.person(alex_id).unwrap().lessons[0].time_range().to_string(),
        "1430-1530"
    );

    assert!(matches!(
        roster.edit_lesson(alex_id, 0, weekly("20 Oct 2021", "1400-1500")),
        Err(TutorError::ClashingLesson)
    ));
    assert!(matches!(
        roster.edit_lesson(alex_id, 3, weekly("12 Oct 2021", "1400-1500")),
        Err(TutorError::NotFound(_))
    ));
}

#[test]
fn test_delete_lesson() {
    let alex = student().with_lessons(vec![weekly("12 Oct 2021", "1400-1500")]);
    let alex_id = alex.id;
    let mut roster = Roster::new(vec![alex]).unwrap();

    let deleted = roster.delete_lesson(alex_id, 0).unwrap();
    assert_eq!(deleted.subject(), "Mathematics");
    assert!(roster.person(alex_id).unwrap().lessons.is_empty());
    assert!(roster.delete_lesson(alex_id, 0).is_err());
}

#[test]
fn test_cancel_and_uncancel_dates() {
    let alex = student().with_lessons(vec![weekly("12 Oct 2021", "1400-1500")]);
    let bernice = student();
    let (alex_id, bernice_id) = (alex.id, bernice.id);
    let mut roster = Roster::new(vec![alex, bernice]).unwrap();

    roster.cancel_lesson_date(alex_id, 0, date("19 Oct 2021")).unwrap();
    // The freed slot can now be booked.
    roster.add_lesson(bernice_id, make_up("19 Oct 2021", "1400-1500")).unwrap();

    assert!(matches!(
        roster.uncancel_lesson_date(alex_id, 0, date("19 Oct 2021")),
        Err(TutorError::ClashingLesson)
    ));

    roster.delete_lesson(bernice_id, 0).unwrap();
    roster.uncancel_lesson_date(alex_id, 0, date("19 Oct 2021")).unwrap();
    assert!(roster.person(alex_id).unwrap().lessons[0].cancelled_dates().is_empty());
}

#[test]
fn test_pay_lesson() {
    let alex = student().with_lessons(vec![
        weekly("12 Oct 2021", "1400-1500").with_outstanding_fees(Money::from_cents(15000)),
    ]);
    let alex_id = alex.id;
    let mut roster = Roster::new(vec![alex]).unwrap();

    let remaining = roster.pay_lesson(alex_id, 0, Money::from_cents(5000)).unwrap();
    assert_eq!(remaining, Money::from_cents(10000));

    assert!(matches!(
        roster.pay_lesson(alex_id, 0, Money::from_cents(10001)),
        Err(TutorError::Overpayment)
    ));
    // Rejected payments leave the balance untouched.
    assert_eq!(roster.total_outstanding_fees().unwrap(), Money::from_cents(10000));

    assert_eq!(roster.pay_lesson(alex_id, 0, Money::from_cents(10000)).unwrap(), Money::ZERO);
}

#[test]
fn test_schedule_queries() {
    let alex = student()
        .with_lessons(vec![weekly("12 Oct 2021", "1400-1500").cancel(date("26 Oct 2021")).unwrap()]);
    let bernice = student().with_lessons(vec![make_up("20 Oct 2021", "0900-1000")]);
    let (alex_id, bernice_id) = (alex.id, bernice.id);
    let roster = Roster::new(vec![alex, bernice]).unwrap();

    let tuesday = roster.lessons_on(date("19 Oct 2021"));
    assert_eq!(tuesday.len(), 1);
    assert_eq!(tuesday[0].person_id, alex_id);
    assert!(tuesday[0].is_recurring);

    assert!(roster.lessons_on(date("26 Oct 2021")).is_empty());
    assert!(roster.lessons_on(date("5 Oct 2021")).is_empty());

    let week = roster.lessons_in_week(date("21 Oct 2021"));
    let people: Vec<_> = week.iter().map(|lesson| (lesson.person_id, lesson.date)).collect();
    assert_eq!(people, vec![(alex_id, date("19 Oct 2021")), (bernice_id, date("20 Oct 2021"))]);

    let upcoming = roster.upcoming(at("2021-10-19T10:00"), Duration::hours(48));
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].start(), at("2021-10-19T14:00"));
    assert_eq!(upcoming[1].start(), at("2021-10-20T09:00"));

    // Already started lessons are not upcoming.
    let later = roster.upcoming(at("2021-10-19T14:01"), Duration::hours(2));
    assert!(later.is_empty());
}

#[test]
fn test_tag_counts_and_total_fees() {
    let alex = student()
        .with_tags(["secondary", "maths"])
        .with_lessons(vec![weekly("12 Oct 2021", "1400-1500").with_outstanding_fees(Money::from_cents(2550))]);
    let bernice = student()
        .with_tags(["secondary"])
        .with_lessons(vec![make_up("20 Oct 2021", "0900-1000").with_outstanding_fees(Money::from_cents(4000))]);
    let roster = Roster::new(vec![alex, bernice]).unwrap();

    let counts = roster.tag_counts();
    assert_eq!(counts.get("secondary"), Some(&2));
    assert_eq!(counts.get("maths"), Some(&1));
    assert_eq!(roster.total_outstanding_fees().unwrap(), Money::from_cents(6550));
}

#[test]
fn test_remove_person() {
    let alex = student();
    let alex_id = alex.id;
    let mut roster = Roster::new(vec![alex]).unwrap();

    assert_eq!(roster.remove_person(alex_id).unwrap().id, alex_id);
    assert!(roster.persons().is_empty());
    assert!(matches!(roster.remove_person(alex_id), Err(TutorError::NotFound(_))));
}

#[rstest]
#[case(Duration::MAX)]
#[case(Duration::days(100_000_000))]
#[case(Duration::hours(-2))]
fn test_upcoming_with_out_of_range_window(#[case] window: Duration) {
    assert!(Roster::default().upcoming(at("2021-10-12T09:00"), window).is_empty());
}

#[test]
fn test_upcoming_window_past_the_last_instant_is_clamped() {
    let alex = student().with_lessons(vec![
        Lesson::recurring(
            date("12 Oct 2021"),
            Some(date("26 Oct 2021")),
            "1400-1500".parse().unwrap(),
            "Mathematics",
            Money::from_cents(5000),
        )
        .unwrap(),
    ]);
    let roster = Roster::new(vec![alex]).unwrap();

    let upcoming = roster.upcoming(at("2021-10-19T09:00"), Duration::MAX);
    let dates: Vec<_> = upcoming.iter().map(|lesson| lesson.date).collect();
    assert_eq!(dates, vec![date("19 Oct 2021"), date("26 Oct 2021")]);
}
