use chrono::NaiveDateTime;
use eyre::{Result, WrapErr};
use tracing::{debug, info, warn};
use tutorbook_core::fees::{Accrual, accrue};
use tutorbook_core::models::last_updated::LastUpdated;
use tutorbook_store::Store;

/// Bills every lesson held since the last launch and persists the result.
///
/// Persons are only written back when something was billed, and the timestamp
/// only when it moved, so a launch with the clock behind writes nothing.
pub async fn run_fee_accrual<S>(store: &S, now: NaiveDateTime) -> Result<Accrual>
where
    S: Store + ?Sized,
{
    let persons = store.load_persons().await.wrap_err("Failed to load persons")?;
    let last_updated = store
        .load_last_updated()
        .await
        .wrap_err("Failed to load last updated timestamp")?;

    debug!(
        "Accruing fees for {} persons, last updated {:?}, now {}",
        persons.len(),
        last_updated.map(|stamp| stamp.to_string()),
        now
    );

    let accrual = accrue(&persons, last_updated, now).wrap_err("Failed to accrue fees")?;

    for (before, after) in persons.iter().zip(&accrual.persons) {
        for (old, new) in before.lessons.iter().zip(&after.lessons) {
            if old.outstanding_fees() != new.outstanding_fees() {
                debug!(
                    "{} ({}): outstanding fees {} -> {}",
                    after.name,
                    new.subject(),
                    old.outstanding_fees(),
                    new.outstanding_fees()
                );
            }
        }
    }

    match last_updated {
        None => warn!("No previous launch recorded; starting fee accrual from {}", accrual.last_updated),
        Some(previous) if LastUpdated::new(now) < previous => {
            warn!("Clock is behind the last launch at {}; no fees accrued", previous)
        }
        Some(_) => {}
    }

    if accrual.lessons_billed > 0 {
        store
            .save_persons(accrual.persons.clone())
            .await
            .wrap_err("Failed to save persons")?;
    }

    // Persons and the timestamp are separate files. Once the persons are
    // written, a failed timestamp write means the next launch bills the same
    // lessons again.
    if last_updated != Some(accrual.last_updated) {
        if let Err(err) = store.save_last_updated(accrual.last_updated).await {
            if accrual.lessons_billed > 0 {
                warn!(
                    "Saved fees for {} lessons but not the timestamp {}; \
                     the next launch will bill them again unless it is restored",
                    accrual.lessons_billed, accrual.last_updated
                );
            }
            return Err(err).wrap_err("Failed to save last updated timestamp");
        }
    }

    info!(
        "Accrued {} across {} lessons; fees now updated to {}",
        accrual.total_accrued, accrual.lessons_billed, accrual.last_updated
    );
    Ok(accrual)
}
