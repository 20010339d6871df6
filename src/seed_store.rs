use chrono::{Datelike, Days, Local, Weekday};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tutorbook_app::config::AppConfig;
use tutorbook_core::models::{
    date::next_or_same, lesson::Lesson, money::Money, person::Person,
};
use tutorbook_store::{Store, create_store};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env()?;

    println!("Opening store in {}...", config.data_dir.display());
    let store = create_store(&config.data_dir).await?;

    if !store.load_persons().await?.is_empty() {
        println!("Store already has persons; leaving it untouched.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let monday = next_or_same(today, Weekday::Mon).unwrap_or(today);
    let wednesday = next_or_same(today, Weekday::Wed).unwrap_or(today);
    let saturday = next_or_same(today, Weekday::Sat).unwrap_or(today);
    let term_end = today.checked_add_days(Days::new(10 * 7));

    let persons = vec![
        Person::new("Alex Yeoh")?
            .with_phone("87438807")
            .with_email("alexyeoh@example.com")
            .with_address("Blk 30 Geylang Street 29, #06-40")
            .with_tags(["secondary"])
            .with_lessons(vec![
                Lesson::recurring(monday, term_end, "1600-1730".parse()?, "Mathematics", "45".parse()?)?
                    .with_homework(["Algebra worksheet"]),
            ]),
        Person::new("Bernice Yu")?
            .with_phone("99272758")
            .with_email("berniceyu@example.com")
            .with_tags(["secondary", "exam-prep"])
            .with_lessons(vec![
                Lesson::recurring(wednesday, None, "1900-2000".parse()?, "Chemistry", "50".parse()?)?,
            ]),
        Person::new("Charlotte Oliveiro")?
            .with_email("charlotte@example.com")
            .with_tags(["primary"])
            .with_lessons(vec![Lesson::make_up(
                saturday,
                "1000-1100".parse()?,
                "English",
                Money::from_cents(3000),
            )?]),
    ];

    println!(
        "Writing {} persons with lessons from {} ({})...",
        persons.len(),
        today,
        today.weekday()
    );
    store.save_persons(persons).await?;
    println!("Store seeded successfully.");

    Ok(())
}
