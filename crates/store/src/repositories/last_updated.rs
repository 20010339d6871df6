use std::path::Path;

use eyre::{Result, WrapErr};
use tutorbook_core::models::last_updated::LastUpdated;

use crate::models::JsonLastUpdated;
use crate::repositories::{read_if_exists, write_atomically};

pub async fn load_last_updated(path: &Path) -> Result<Option<LastUpdated>> {
    let Some(contents) = read_if_exists(path).await? else {
        return Ok(None);
    };

    let record: JsonLastUpdated = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("Malformed timestamp in {}", path.display()))?;

    tracing::debug!("Fees last accrued at {}", record.last_updated);
    Ok(Some(LastUpdated::new(record.last_updated.date_time())))
}

pub async fn save_last_updated(path: &Path, last_updated: LastUpdated) -> Result<()> {
    tracing::debug!("Saving last updated {} to {}", last_updated, path.display());

    let contents = serde_json::to_string_pretty(&JsonLastUpdated { last_updated })?;
    write_atomically(path, &contents).await
}
