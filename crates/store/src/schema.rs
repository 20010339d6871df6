use std::path::Path;

use eyre::{Result, WrapErr};
use tracing::info;

pub async fn initialize_store(data_dir: &Path) -> Result<()> {
    info!("Initializing store in {}...", data_dir.display());

    tokio::fs::create_dir_all(data_dir)
        .await
        .wrap_err_with(|| format!("Failed to create data directory {}", data_dir.display()))?;

    // Leftovers from an interrupted write; the real file was never replaced.
    for file in [crate::PERSONS_FILE, crate::LAST_UPDATED_FILE] {
        let tmp_path = data_dir.join(file).with_extension("json.tmp");
        if tokio::fs::try_exists(&tmp_path).await.unwrap_or(false) {
            tracing::warn!("Removing incomplete write {}", tmp_path.display());
            tokio::fs::remove_file(&tmp_path).await?;
        }
    }

    info!("Store initialized successfully.");
    Ok(())
}
