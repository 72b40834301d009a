//! Temp-file database for repository tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

pub(crate) struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    // Keeps the directory alive for the duration of the test.
    _dir: TempDir,
}

/// Must be called from within a Tokio runtime (the writer actor is spawned).
pub(crate) fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_path = db_path.to_string_lossy().to_string();

    init(&db_path).expect("Failed to init database");
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer(&pool).expect("Failed to spawn writer");

    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}
