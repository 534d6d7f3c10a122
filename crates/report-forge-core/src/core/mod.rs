// crates/report-forge-core/src/core/mod.rs
// ============================================================================
// Module: Report Forge Core Model
// Description: Document model, identifiers, enumerations, and time helpers.
// Purpose: Group the pure data layer consumed by the runtime modules.
// Dependencies: serde, serde_json, thiserror, time, query-filter
// ============================================================================

//! ## Overview
//! The core layer holds the report document model and its supporting types.
//! Nothing here performs I/O or reads the wall clock; all mutation flows
//! through the runtime layer's update protocol.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod info;
pub mod time;
pub mod types;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use identifiers::IdentifierError;
pub use identifiers::Platform;
pub use identifiers::ReportId;
pub use identifiers::ReportKey;
pub use info::AssetsFilter;
pub use info::CertificationsFilter;
pub use info::ConditionValue;
pub use info::CoursesFilter;
pub use info::DATE_FILTER_NAMES;
pub use info::DateOptionsFilter;
pub use info::Enrollment;
pub use info::EntityFilter;
pub use info::ExternalTrainingStatusFilter;
pub use info::LastEditBy;
pub use info::Planning;
pub use info::PlanningOption;
pub use info::PublishStatus;
pub use info::ReportInfo;
pub use info::SelectionRef;
pub use info::SessionAttendanceType;
pub use info::SessionDates;
pub use info::SortingOptions;
pub use info::UsersFilter;
pub use info::Visibility;
pub use types::DateAnchorKind;
pub use types::DateOperator;
pub use types::EXTRA_FIELD_PREFIXES;
pub use types::EnrollmentTypes;
pub use types::ORDER_BY_VALUES;
pub use types::REPORT_FIELDS;
pub use types::ReportKind;
pub use types::SORT_SELECTORS;
pub use types::TEXT_OPERATORS;
pub use types::TIME_FRAMES;
pub use types::UserLevel;
pub use types::VisibilityRule;
pub use types::is_valid_report_field;
