// crates/report-forge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Report Forge Interfaces
// Description: Traits for document persistence, query execution, and time.
// Purpose: Keep the core pure by pushing I/O behind narrow host-implemented
//          seams.
// Dependencies: serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! The core consumes three collaborators as opaque traits: a document store
//! keyed by [`ReportKey`], a query runner that executes already-substituted
//! SQL, and a clock. Hosts implement them at the edge; tests use the
//! in-memory store and fixed clocks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;
use time::OffsetDateTime;

use crate::core::identifiers::ReportKey;
use crate::core::info::ReportInfo;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Document store failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("store i/o error: {0}")]
    Io(String),
    /// Stored document failed integrity verification.
    #[error("store corruption detected: {0}")]
    Corrupt(String),
    /// Store schema version does not match this build.
    #[error("store schema version mismatch: found {found}, expected {expected}")]
    VersionMismatch {
        /// Version found on disk.
        found: i64,
        /// Version this build requires.
        expected: i64,
    },
    /// Document failed to serialize or deserialize.
    #[error("store serialization error: {0}")]
    Serialization(String),
    /// Backend-specific failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

// ============================================================================
// SECTION: Query Errors
// ============================================================================

/// Query execution failures.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The engine rejected the query.
    #[error("query rejected by engine: {0}")]
    Rejected(String),
    /// Execution failed after acceptance.
    #[error("query execution failed: {0}")]
    Execution(String),
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Document store keyed by report identity.
pub trait ReportStore {
    /// Loads one report document.
    ///
    /// Returns `Ok(None)` when no document exists for the key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails or the stored document
    /// fails integrity verification.
    fn load(&self, key: &ReportKey) -> Result<Option<ReportInfo>, StoreError>;

    /// Writes one report document, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend fails.
    fn save(&self, key: &ReportKey, info: &ReportInfo) -> Result<(), StoreError>;

    /// Readiness probe.
    ///
    /// Defaults to ready; durable stores override with a real check.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot serve requests.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Executes already-substituted SQL against the analytics engine.
///
/// The core only ever hands this trait SQL that has passed the query-filter
/// gate and substitution; the runner performs no further validation.
pub trait QueryRunner {
    /// Executes one query and returns its rows as JSON values.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the engine rejects or fails the query.
    fn execute(&self, sql: &str) -> Result<Vec<Value>, QueryError>;
}

/// Wall-clock source.
///
/// The core never reads the system clock directly; hosts inject one.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;
}

/// System clock for production hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
