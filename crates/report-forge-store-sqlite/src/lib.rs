// crates/report-forge-store-sqlite/src/lib.rs
// ============================================================================
// Module: Report Forge SQLite Store Library
// Description: Durable report document store backed by SQLite.
// Purpose: Expose the SQLite ReportStore implementation and its config.
// Dependencies: report-forge-core, rusqlite, serde, serde_jcs, serde_json,
//               sha2, thiserror
// ============================================================================

//! ## Overview
//! Durable [`report_forge_core::ReportStore`] implementation over `SQLite`.
//! Documents are stored as canonical JSON with SHA-256 digests verified on
//! every load.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use store::MAX_DOCUMENT_BYTES;
pub use store::SqliteReportStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
