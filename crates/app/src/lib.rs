//! # TutorBook App
//!
//! The launch sequence for TutorBook. Every launch loads the roster from the
//! store, bills lessons held since the previous launch, persists the result and
//! lists the lessons coming up soon.
//!
//! ## Architecture
//!
//! - **Config**: environment and application configuration
//! - **Accrual**: fee accrual against a [`Store`]
//! - **Reminders**: upcoming lessons for the tutor

/// Configuration module for launch settings
pub mod config;
/// Fee accrual run at every launch
pub mod accrual;
/// Upcoming lesson reminders
pub mod reminders;

use chrono::NaiveDateTime;
use eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tutorbook_core::{
    models::money::Money,
    roster::{Roster, ScheduledLesson},
};
use tutorbook_store::Store;

/// What a launch did, for the binary to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// Occurrences billed since the previous launch
    pub lessons_billed: u64,
    /// Fees added by this launch
    pub total_accrued: Money,
    /// Fees owed across every person after accrual
    pub total_outstanding: Money,
    /// Lessons starting within the reminder window
    pub upcoming: Vec<ScheduledLesson>,
}

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &config::AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Runs the launch sequence against `store` at wall-clock time `now`
///
/// # Arguments
///
/// * `config` - Launch configuration
/// * `store` - Where persons and the last-updated timestamp live
/// * `now` - Current local time
///
/// # Returns
///
/// * `Result<LaunchReport>` - Summary of the launch or error
pub async fn launch<S>(config: &config::AppConfig, store: &S, now: NaiveDateTime) -> Result<LaunchReport>
where
    S: Store + ?Sized,
{
    let accrual = accrual::run_fee_accrual(store, now).await?;

    let roster = Roster::new(accrual.persons).wrap_err("Stored roster has clashing lessons")?;
    let total_outstanding = roster.total_outstanding_fees()?;

    let upcoming = reminders::upcoming_lessons(&roster, now, config.remind_window());
    info!(
        "{} lessons in the next {} hours; {} outstanding",
        upcoming.len(),
        config.remind_window_hours,
        total_outstanding
    );
    for lesson in &upcoming {
        info!("Upcoming: {}", reminders::format_reminder(lesson));
    }

    Ok(LaunchReport {
        lessons_billed: accrual.lessons_billed,
        total_accrued: accrual.total_accrued,
        total_outstanding,
        upcoming,
    })
}
