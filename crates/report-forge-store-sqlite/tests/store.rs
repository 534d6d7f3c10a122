// crates/report-forge-store-sqlite/tests/store.rs
// ============================================================================
// Module: SQLite Report Store Integration Tests
// Description: Round-trip, integrity, and schema-version scenarios.
// Purpose: Exercise the durable store through the ReportStore trait against
//          real database files.
// ============================================================================

//! Integration tests for the `SQLite` report store.

use report_forge_core::Platform;
use report_forge_core::ReportId;
use report_forge_core::ReportInfo;
use report_forge_core::ReportKey;
use report_forge_core::ReportKind;
use report_forge_core::ReportStore;
use report_forge_core::StoreError;
use report_forge_store_sqlite::SqliteReportStore;
use report_forge_store_sqlite::SqliteStoreConfig;
use report_forge_store_sqlite::SqliteStoreError;
use report_forge_store_sqlite::SqliteStoreMode;
use report_forge_store_sqlite::SqliteSyncMode;
use time::macros::datetime;

/// Store config pointing at a file inside the test directory.
fn config(dir: &tempfile::TempDir) -> SqliteStoreConfig {
    SqliteStoreConfig {
        path: dir.path().join("reports.sqlite"),
        busy_timeout_ms: 1_000,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    }
}

/// Key fixture shared by the store tests.
fn key() -> Result<ReportKey, Box<dyn std::error::Error>> {
    Ok(ReportKey::new(
        ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")?,
        Platform::parse("hydra.example.com")?,
    ))
}

/// Document fixture shared by the store tests.
fn info(key: &ReportKey) -> ReportInfo {
    let mut info = ReportInfo::new(
        ReportKind::UsersCourses,
        key,
        1042,
        "Quarterly completions",
        datetime!(2024-03-05 12:00:00 UTC),
    );
    info.fields = vec!["user.username".into(), "course.name".into()];
    info
}

#[test]
fn save_then_load_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = SqliteReportStore::new(config(&dir))?;
    let key = key()?;
    let info = info(&key);
    assert!(store.load(&key)?.is_none());
    store.save(&key, &info)?;
    assert_eq!(store.load(&key)?, Some(info));
    store.readiness()?;
    Ok(())
}

#[test]
fn save_replaces_the_previous_document() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = SqliteReportStore::new(config(&dir))?;
    let key = key()?;
    let mut info = info(&key);
    store.save(&key, &info)?;
    info.title = "Renamed".into();
    store.save(&key, &info)?;
    assert_eq!(store.load(&key)?.map(|loaded| loaded.title), Some("Renamed".into()));
    Ok(())
}

#[test]
fn documents_survive_a_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let key = key()?;
    let info = info(&key);
    {
        let store = SqliteReportStore::new(config(&dir))?;
        store.save(&key, &info)?;
    }
    let reopened = SqliteReportStore::new(config(&dir))?;
    assert_eq!(reopened.load(&key)?, Some(info));
    Ok(())
}

#[test]
fn tampered_payload_fails_closed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let cfg = config(&dir);
    let store = SqliteReportStore::new(cfg.clone())?;
    let key = key()?;
    store.save(&key, &info(&key))?;
    drop(store);
    {
        let connection = rusqlite::Connection::open(&cfg.path)?;
        connection.execute(
            "UPDATE reports SET report_json = ?1",
            rusqlite::params![b"{\"forged\":true}".to_vec()],
        )?;
    }
    let reopened = SqliteReportStore::new(cfg)?;
    let result = reopened.load(&key);
    assert!(matches!(result, Err(StoreError::Corrupt(_))));
    Ok(())
}

#[test]
fn unsupported_schema_version_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let cfg = config(&dir);
    {
        let store = SqliteReportStore::new(cfg.clone())?;
        drop(store);
    }
    {
        let connection = rusqlite::Connection::open(&cfg.path)?;
        connection.execute("UPDATE store_meta SET version = 99", rusqlite::params![])?;
    }
    let result = SqliteReportStore::new(cfg);
    assert!(matches!(result, Err(SqliteStoreError::VersionMismatch { found: 99 })));
    Ok(())
}

#[test]
fn directory_store_path_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let cfg = SqliteStoreConfig {
        path: dir.path().to_path_buf(),
        busy_timeout_ms: 1_000,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    };
    assert!(matches!(SqliteReportStore::new(cfg), Err(SqliteStoreError::Invalid(_))));
    Ok(())
}
