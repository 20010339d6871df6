pub mod last_updated;
pub mod persons;

use std::io::ErrorKind;
use std::path::Path;

use eyre::{Result, WrapErr};

/// Reads `path`, treating a missing file as no data.
pub(crate) async fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!("No file at {}, starting empty", path.display());
            Ok(None)
        }
        Err(err) => Err(err).wrap_err_with(|| format!("Failed to read {}", path.display())),
    }
}

/// Writes to a sibling `.json.tmp` file, then renames it over `path`.
pub(crate) async fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, contents)
        .await
        .wrap_err_with(|| format!("Failed to write {}", tmp_path.display()))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .wrap_err_with(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
