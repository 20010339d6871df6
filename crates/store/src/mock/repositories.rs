use async_trait::async_trait;
use mockall::mock;
use tutorbook_core::models::{last_updated::LastUpdated, person::Person};

use crate::Store;

// Mock store for testing the launch flow without touching the filesystem
mock! {
    pub Store {}

    #[async_trait]
    impl Store for Store {
        async fn load_persons(&self) -> eyre::Result<Vec<Person>>;

        async fn save_persons(&self, persons: Vec<Person>) -> eyre::Result<()>;

        async fn load_last_updated(&self) -> eyre::Result<Option<LastUpdated>>;

        async fn save_last_updated(&self, last_updated: LastUpdated) -> eyre::Result<()>;
    }
}
