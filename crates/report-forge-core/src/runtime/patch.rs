// crates/report-forge-core/src/runtime/patch.rs
// ============================================================================
// Module: Report Patch
// Description: Typed sparse patch produced by the validator.
// Purpose: Carry only the whitelisted, type-checked fields of a partial
//          update; everything absent stays untouched on merge.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A [`ReportPatch`] is the validator's output: every field is optional, and
//! only fields the merge whitelist recognizes exist at all. Unknown fields in
//! the incoming payload never reach this type, which is what makes them
//! silent no-ops instead of errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::info::ConditionValue;
use crate::core::info::SelectionRef;
use crate::core::types::EnrollmentTypes;
use crate::core::types::VisibilityRule;

// ============================================================================
// SECTION: Sub-Patches
// ============================================================================

/// Sparse sorting-options patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortingOptionsPatch {
    /// Selector mode.
    pub selector: Option<String>,
    /// Sort column.
    pub selected_field: Option<String>,
    /// Sort direction.
    pub order_by: Option<String>,
}

/// Sparse visibility patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityPatch {
    /// Visibility rule.
    pub rule: Option<VisibilityRule>,
    /// Selected power users.
    pub users: Option<Vec<SelectionRef>>,
    /// Selected groups.
    pub groups: Option<Vec<SelectionRef>>,
    /// Selected branches.
    pub branches: Option<Vec<SelectionRef>>,
}

/// Sparse planning-option patch.
///
/// `hostname` and `subfolder` are absent on purpose; the update protocol
/// stamps them from caller context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningOptionPatch {
    /// Repetition count.
    pub every: Option<u64>,
    /// Repetition time frame.
    pub time_frame: Option<String>,
    /// Recipient e-mail addresses.
    pub recipients: Option<Vec<String>>,
    /// First scheduled date.
    pub schedule_from: Option<String>,
    /// Delivery hour.
    pub start_hour: Option<String>,
    /// Schedule timezone.
    pub timezone: Option<String>,
}

/// Sparse planning patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningPatch {
    /// Schedule activation flag.
    pub active: Option<bool>,
    /// Schedule option sub-patch.
    pub option: Option<PlanningOptionPatch>,
}

/// Sparse date-filter patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateFilterPatch {
    /// Disabled-filter marker.
    pub any: Option<bool>,
    /// Operator.
    pub operator: Option<String>,
    /// Anchor kind.
    pub kind: Option<String>,
    /// Range start or absolute anchor.
    pub from: Option<String>,
    /// Range end or absolute anchor.
    pub to: Option<String>,
    /// Day count.
    pub days: Option<u64>,
}

impl DateFilterPatch {
    /// True when no field of the patch is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.any.is_none()
            && self.operator.is_none()
            && self.kind.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.days.is_none()
    }
}

/// Sparse audience-filter patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersFilterPatch {
    /// Select every user.
    pub all: Option<bool>,
    /// Exclude deactivated users.
    pub hide_deactivated: Option<bool>,
    /// Restrict to learner-level users.
    pub show_only_learners: Option<bool>,
    /// Exclude expired accounts.
    pub hide_expired_users: Option<bool>,
    /// Include user additional fields.
    pub is_user_add_fields: Option<bool>,
    /// Selected users.
    pub users: Option<Vec<SelectionRef>>,
    /// Selected groups.
    pub groups: Option<Vec<SelectionRef>>,
    /// Selected branches.
    pub branches: Option<Vec<SelectionRef>>,
}

/// Sparse course-filter patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursesFilterPatch {
    /// Select every course.
    pub all: Option<bool>,
    /// Selected courses.
    pub courses: Option<Vec<SelectionRef>>,
    /// Selected learning plans.
    pub learning_plans: Option<Vec<SelectionRef>>,
}

/// Sparse single-list family patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFilterPatch {
    /// Select every entity.
    pub all: Option<bool>,
    /// Selected entities.
    pub entities: Option<Vec<SelectionRef>>,
}

/// Sparse asset-filter patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetsFilterPatch {
    /// Select every asset.
    pub all: Option<bool>,
    /// Selected assets.
    pub assets: Option<Vec<SelectionRef>>,
    /// Selected channels.
    pub channels: Option<Vec<SelectionRef>>,
}

/// Sparse certification-filter patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificationsFilterPatch {
    /// Select every certification.
    pub all: Option<bool>,
    /// Include active certifications.
    pub active_certifications: Option<bool>,
    /// Include expired certifications.
    pub expired_certifications: Option<bool>,
    /// Include archived records.
    pub archived_certifications: Option<bool>,
    /// Selected certifications.
    pub certifications: Option<Vec<SelectionRef>>,
    /// Issue-date sub-patch.
    pub certification_date: Option<DateFilterPatch>,
    /// Expiration-date sub-patch.
    pub certification_expiration_date: Option<DateFilterPatch>,
}

/// Sparse session date-window patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDatesPatch {
    /// Session start-date sub-patch.
    pub start_date: Option<DateFilterPatch>,
    /// Session end-date sub-patch.
    pub end_date: Option<DateFilterPatch>,
}

/// Sparse enrollment patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentPatch {
    /// Completed enrollments.
    pub completed: Option<bool>,
    /// In-progress enrollments.
    pub in_progress: Option<bool>,
    /// Enrollments never started.
    pub not_started: Option<bool>,
    /// Waiting-list enrollments.
    pub waiting_list: Option<bool>,
    /// Suspended enrollments.
    pub suspended: Option<bool>,
    /// Enrollments pending confirmation.
    pub enrollments_to_confirm: Option<bool>,
    /// Subscribed enrollments.
    pub subscribed: Option<bool>,
    /// Overbooked enrollments.
    pub overbooking: Option<bool>,
    /// Record scope.
    pub enrollment_types: Option<EnrollmentTypes>,
}

/// Sparse external-training status patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalTrainingStatusPatch {
    /// Approved records.
    pub approved: Option<bool>,
    /// Waiting records.
    pub waiting: Option<bool>,
    /// Rejected records.
    pub rejected: Option<bool>,
}

/// Sparse publication-status patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishStatusPatch {
    /// Published assets.
    pub published: Option<bool>,
    /// Unpublished assets.
    pub unpublished: Option<bool>,
}

/// Sparse attendance-type patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionAttendancePatch {
    /// Blended sessions.
    pub blended: Option<bool>,
    /// Flexible-attendance sessions.
    pub flexible: Option<bool>,
    /// Fully online sessions.
    pub full_online: Option<bool>,
    /// Fully on-site sessions.
    pub full_onsite: Option<bool>,
}

// ============================================================================
// SECTION: Report Patch
// ============================================================================

/// Typed sparse patch for one report document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPatch {
    /// Login requirement for the download link.
    pub login_required: Option<bool>,
    /// Free-text description.
    pub description: Option<String>,
    /// Report title.
    pub title: Option<String>,
    /// Display timezone.
    pub timezone: Option<String>,
    /// Selected output columns.
    pub fields: Option<Vec<String>>,
    /// Query-builder custom filter values.
    pub conditions: Option<BTreeMap<String, ConditionValue>>,
    /// Selected user additional-field columns.
    pub user_additional_fields_filter: Option<BTreeMap<String, bool>>,
    /// Selected learning-object types.
    pub lo_types: Option<BTreeMap<String, bool>>,
    /// Sorting sub-patch.
    pub sorting_options: Option<SortingOptionsPatch>,
    /// Visibility sub-patch.
    pub visibility: Option<VisibilityPatch>,
    /// Planning sub-patch.
    pub planning: Option<PlanningPatch>,
    /// Audience sub-patch.
    pub users: Option<UsersFilterPatch>,
    /// Course sub-patch.
    pub courses: Option<CoursesFilterPatch>,
    /// Survey sub-patch.
    pub surveys: Option<EntityFilterPatch>,
    /// Learning-plan sub-patch.
    pub learning_plans: Option<EntityFilterPatch>,
    /// Badge sub-patch.
    pub badges: Option<EntityFilterPatch>,
    /// Asset sub-patch.
    pub assets: Option<AssetsFilterPatch>,
    /// Session sub-patch.
    pub sessions: Option<EntityFilterPatch>,
    /// Instructor sub-patch.
    pub instructors: Option<EntityFilterPatch>,
    /// Certification sub-patch.
    pub certifications: Option<CertificationsFilterPatch>,
    /// Session date-window sub-patch.
    pub session_dates: Option<SessionDatesPatch>,
    /// Enrollment sub-patch.
    pub enrollment: Option<EnrollmentPatch>,
    /// External-training status sub-patch.
    pub external_training_status_filter: Option<ExternalTrainingStatusPatch>,
    /// Publication-status sub-patch.
    pub publish_status: Option<PublishStatusPatch>,
    /// Attendance-type sub-patch.
    pub session_attendance_type: Option<SessionAttendancePatch>,
    /// Named date-filter sub-patches, keyed by wire name.
    pub date_filters: BTreeMap<String, DateFilterPatch>,
}
