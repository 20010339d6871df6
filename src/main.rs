use color_eyre::eyre::Result;
use dotenv::dotenv;
use tutorbook_app::config::AppConfig;
use tutorbook_store::create_store;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env()?;
    tutorbook_app::init_tracing(&config)?;

    // Open the data directory
    let store = create_store(&config.data_dir).await?;

    // Accrue fees and list upcoming lessons
    let now = chrono::Local::now().naive_local();
    let report = tutorbook_app::launch(&config, &store, now).await?;

    println!(
        "Billed {} lessons ({}). Outstanding fees: {}.",
        report.lessons_billed, report.total_accrued, report.total_outstanding
    );
    for lesson in &report.upcoming {
        println!("  {}", tutorbook_app::reminders::format_reminder(lesson));
    }

    Ok(())
}
