//! # TutorBook Store
//!
//! Persistence for the roster and the last-updated timestamp. The core never
//! touches the filesystem; it is handed persons and a timestamp loaded through
//! the [`Store`] trait and returns updated values to be saved the same way.
//!
//! [`JsonStore`] keeps one JSON file per repository inside a data directory:
//!
//! - `persons.json`: every person with their lessons
//! - `last_updated.json`: when fees were last accrued

pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eyre::Result;
use tutorbook_core::models::{last_updated::LastUpdated, person::Person};

pub const PERSONS_FILE: &str = "persons.json";
pub const LAST_UPDATED_FILE: &str = "last_updated.json";

#[async_trait]
pub trait Store: Send + Sync {
    async fn load_persons(&self) -> Result<Vec<Person>>;

    async fn save_persons(&self, persons: Vec<Person>) -> Result<()>;

    async fn load_last_updated(&self) -> Result<Option<LastUpdated>>;

    async fn save_last_updated(&self, last_updated: LastUpdated) -> Result<()>;
}

/// File-backed store writing JSON into a single data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn persons_path(&self) -> PathBuf {
        self.data_dir.join(PERSONS_FILE)
    }

    pub fn last_updated_path(&self) -> PathBuf {
        self.data_dir.join(LAST_UPDATED_FILE)
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn load_persons(&self) -> Result<Vec<Person>> {
        repositories::persons::load_persons(&self.persons_path()).await
    }

    async fn save_persons(&self, persons: Vec<Person>) -> Result<()> {
        repositories::persons::save_persons(&self.persons_path(), &persons).await
    }

    async fn load_last_updated(&self) -> Result<Option<LastUpdated>> {
        repositories::last_updated::load_last_updated(&self.last_updated_path()).await
    }

    async fn save_last_updated(&self, last_updated: LastUpdated) -> Result<()> {
        repositories::last_updated::save_last_updated(&self.last_updated_path(), last_updated).await
    }
}

/// Opens the store at `data_dir`, creating the directory if needed.
pub async fn create_store(data_dir: impl Into<PathBuf>) -> Result<JsonStore> {
    let store = JsonStore::new(data_dir);
    schema::initialize_store(store.data_dir()).await?;
    Ok(store)
}
