// crates/report-forge-core/src/lib.rs
// ============================================================================
// Module: Report Forge Core
// Description: Report document model, patch protocol, and orchestration.
// Purpose: Crate root wiring the core model, interfaces, and runtime layers.
// Dependencies: regex, serde, serde_json, thiserror, time, query-filter
// ============================================================================

//! ## Overview
//! Report Forge core implements the configuration engine of the reporting
//! backend: the typed report document, the schema-driven patch validator, the
//! whitelist-driven merger, the cross-field post-merge checks, and the atomic
//! update protocol of the [`Report`] entity. Query templating lives in the
//! companion `query-filter` crate; persistence implementations live behind
//! the [`interfaces::ReportStore`] trait.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use core::DateOptionsFilter;
pub use core::Enrollment;
pub use core::IdentifierError;
pub use core::Planning;
pub use core::PlanningOption;
pub use core::Platform;
pub use core::ReportId;
pub use core::ReportInfo;
pub use core::ReportKey;
pub use core::ReportKind;
pub use core::UserLevel;
pub use core::Visibility;
pub use core::VisibilityRule;
pub use interfaces::Clock;
pub use interfaces::QueryError;
pub use interfaces::QueryRunner;
pub use interfaces::ReportStore;
pub use interfaces::StoreError;
pub use interfaces::SystemClock;
pub use runtime::InMemoryReportStore;
pub use runtime::Report;
pub use runtime::ReportError;
pub use runtime::ReportPatch;
pub use runtime::ReportService;
pub use runtime::ServiceError;
pub use runtime::UpdateContext;
pub use runtime::UpdateRequest;
