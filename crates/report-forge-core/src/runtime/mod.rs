// crates/report-forge-core/src/runtime/mod.rs
// ============================================================================
// Module: Report Forge Runtime
// Description: Validation, merge, checks, entity, and service orchestration.
// Purpose: Group everything that mutates a report document behind the atomic
//          update protocol.
// Dependencies: regex, serde_json, thiserror, time, query-filter
// ============================================================================

//! ## Overview
//! The runtime layer implements the update protocol: the validator produces a
//! typed sparse patch, the merger applies it, the checks gate the result, and
//! the entity commits by single assignment. The service wires a store and a
//! clock around the entity.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checks;
pub mod error;
pub mod merge;
pub mod patch;
pub mod report;
pub mod service;
pub mod store;
pub mod validator;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use checks::run_post_merge_checks;
pub use error::GENERIC_VALIDATION_FIELD;
pub use error::ReportError;
pub use merge::merge_patch;
pub use patch::AssetsFilterPatch;
pub use patch::CertificationsFilterPatch;
pub use patch::CoursesFilterPatch;
pub use patch::DateFilterPatch;
pub use patch::EnrollmentPatch;
pub use patch::EntityFilterPatch;
pub use patch::ExternalTrainingStatusPatch;
pub use patch::PlanningOptionPatch;
pub use patch::PlanningPatch;
pub use patch::PublishStatusPatch;
pub use patch::ReportPatch;
pub use patch::SessionAttendancePatch;
pub use patch::SessionDatesPatch;
pub use patch::SortingOptionsPatch;
pub use patch::UsersFilterPatch;
pub use patch::VisibilityPatch;
pub use report::Report;
pub use report::UpdateContext;
pub use service::ReportService;
pub use service::ServiceError;
pub use service::UpdateRequest;
pub use store::InMemoryReportStore;
pub use validator::IMMUTABLE_FIELDS;
pub use validator::validate_update;
