use std::sync::Arc;

use freegames::adapter::outbound::sqlite::database::connection::open;
use freegames::adapter::outbound::sqlite::SqliteTargetStore;
use tempfile::TempDir;

/// Temporary SQLite database for integration tests.
///
/// The file lives in its own temp directory, removed on drop.
pub struct TempDb {
    dir: TempDir,
    url: String,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = dir.path().join("freegames.db").to_string_lossy().into_owned();
        Self { dir, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("freegames.db")
    }

    /// A fresh store over this database; several stores share one file.
    pub fn store(&self) -> Arc<SqliteTargetStore> {
        Arc::new(SqliteTargetStore::new(open(&self.url).expect("open sqlite store")))
    }
}
