// crates/report-forge-core/src/core/info.rs
// ============================================================================
// Module: Report Configuration Document
// Description: Typed report configuration document and its sub-documents.
// Purpose: Model the tenant-scoped report configuration with explicit optional
//          sub-documents per filter family.
// Dependencies: serde, serde_json, query-filter, time
// ============================================================================

//! ## Overview
//! [`ReportInfo`] is the authoritative configuration for one report. Filter
//! families (`users`, `courses`, ...) and named date filters are explicit
//! optional sub-documents; a family is absent until something sets it. Patch
//! merges lazily initialize a family before writing into it. Unknown wire
//! fields are dropped on deserialization, which is what gives patches their
//! whitelist semantics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use query_filter::FilterType;
use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::identifiers::Platform;
use crate::core::identifiers::ReportId;
use crate::core::identifiers::ReportKey;
use crate::core::time::format_stamp;
use crate::core::types::EnrollmentTypes;
use crate::core::types::ReportKind;
use crate::core::types::VisibilityRule;

// ============================================================================
// SECTION: Leaf Sub-Documents
// ============================================================================

/// Audit record of the last editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LastEditBy {
    /// Numeric user id of the editor.
    pub id_user: Option<u64>,
    /// Editor first name, cleared on every update.
    pub firstname: Option<String>,
    /// Editor last name, cleared on every update.
    pub lastname: Option<String>,
    /// Editor username, cleared on every update.
    pub username: Option<String>,
    /// Editor avatar URL, cleared on every update.
    pub avatar: Option<String>,
}

/// Output sorting configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortingOptions {
    /// Selector mode, `default` or `custom`.
    pub selector: String,
    /// Column the output is sorted by.
    pub selected_field: String,
    /// Sort direction, `asc` or `desc`.
    pub order_by: String,
}

/// One selected entity reference inside an id-list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionRef {
    /// Entity id.
    pub id: u64,
    /// Branch selections may include descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descendants: Option<bool>,
}

/// Report visibility configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visibility {
    /// Visibility rule.
    #[serde(rename = "type")]
    pub rule: VisibilityRule,
    /// Selected power users.
    pub users: Vec<SelectionRef>,
    /// Selected groups.
    pub groups: Vec<SelectionRef>,
    /// Selected branches.
    pub branches: Vec<SelectionRef>,
}

impl Visibility {
    /// True when at least one selection list is non-empty.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.users.is_empty() || !self.groups.is_empty() || !self.branches.is_empty()
    }
}

// ============================================================================
// SECTION: Planning
// ============================================================================

/// Schedule options for a planned report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningOption {
    /// Repetition count within the time frame.
    pub every: Option<u64>,
    /// Repetition time frame, `day`, `week`, or `month`.
    pub time_frame: Option<String>,
    /// Delivery recipient e-mail addresses.
    pub recipients: Vec<String>,
    /// First scheduled date.
    pub schedule_from: Option<String>,
    /// Delivery hour, `HH:00`.
    pub start_hour: Option<String>,
    /// Schedule timezone, IANA name.
    pub timezone: Option<String>,
    /// Host that last activated the schedule, stamped by the update protocol.
    pub hostname: Option<String>,
    /// Tenant subfolder, stamped by the update protocol.
    pub subfolder: Option<String>,
}

/// Planning block of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Planning {
    /// Whether scheduled delivery is active.
    pub active: bool,
    /// Schedule options.
    pub option: PlanningOption,
}

// ============================================================================
// SECTION: Date Filter
// ============================================================================

/// One date-range filter.
///
/// # Invariants
/// - `any == true` disables the filter regardless of the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateOptionsFilter {
    /// Disabled-filter marker.
    pub any: bool,
    /// Operator, one of `isAfter`, `isBefore`, `range`, `expiringIn`.
    pub operator: String,
    /// Anchor kind for `isAfter`/`isBefore`, `relative` or `absolute`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Range start or absolute anchor.
    pub from: String,
    /// Range end or absolute anchor.
    pub to: String,
    /// Day count for relative anchors and `expiringIn`.
    pub days: u64,
}

impl Default for DateOptionsFilter {
    fn default() -> Self {
        Self {
            any: true,
            operator: String::new(),
            kind: String::new(),
            from: String::new(),
            to: String::new(),
            days: 1,
        }
    }
}

// ============================================================================
// SECTION: Entity Filter Families
// ============================================================================

/// Audience filter family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsersFilter {
    /// Select every user.
    pub all: bool,
    /// Exclude deactivated users.
    pub hide_deactivated: bool,
    /// Restrict to learner-level users.
    pub show_only_learners: bool,
    /// Exclude users whose account expired.
    pub hide_expired_users: bool,
    /// Include user additional fields in the output.
    pub is_user_add_fields: bool,
    /// Selected users.
    pub users: Vec<SelectionRef>,
    /// Selected groups.
    pub groups: Vec<SelectionRef>,
    /// Selected branches.
    pub branches: Vec<SelectionRef>,
}

impl Default for UsersFilter {
    fn default() -> Self {
        Self {
            all: true,
            hide_deactivated: true,
            show_only_learners: false,
            hide_expired_users: false,
            is_user_add_fields: false,
            users: Vec::new(),
            groups: Vec::new(),
            branches: Vec::new(),
        }
    }
}

/// Course filter family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoursesFilter {
    /// Select every course.
    pub all: bool,
    /// Selected courses.
    pub courses: Vec<SelectionRef>,
    /// Selected learning plans feeding the course set.
    pub learning_plans: Vec<SelectionRef>,
}

impl Default for CoursesFilter {
    fn default() -> Self {
        Self {
            all: true,
            courses: Vec::new(),
            learning_plans: Vec::new(),
        }
    }
}

/// Single-list filter family shared by surveys, learning plans, badges,
/// sessions, and instructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityFilter {
    /// Select every entity.
    pub all: bool,
    /// Selected entities.
    pub entities: Vec<SelectionRef>,
}

impl Default for EntityFilter {
    fn default() -> Self {
        Self {
            all: true,
            entities: Vec::new(),
        }
    }
}

/// Asset filter family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetsFilter {
    /// Select every asset.
    pub all: bool,
    /// Selected assets.
    pub assets: Vec<SelectionRef>,
    /// Selected channels feeding the asset set.
    pub channels: Vec<SelectionRef>,
}

impl Default for AssetsFilter {
    fn default() -> Self {
        Self {
            all: true,
            assets: Vec::new(),
            channels: Vec::new(),
        }
    }
}

/// Certification filter family with nested date sub-filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationsFilter {
    /// Select every certification.
    pub all: bool,
    /// Include active certifications.
    pub active_certifications: bool,
    /// Include expired certifications.
    pub expired_certifications: bool,
    /// Include archived certification records.
    pub archived_certifications: bool,
    /// Selected certifications.
    pub certifications: Vec<SelectionRef>,
    /// Issue-date sub-filter.
    pub certification_date: DateOptionsFilter,
    /// Expiration-date sub-filter.
    pub certification_expiration_date: DateOptionsFilter,
}

impl Default for CertificationsFilter {
    fn default() -> Self {
        Self {
            all: true,
            active_certifications: true,
            expired_certifications: false,
            archived_certifications: false,
            certifications: Vec::new(),
            certification_date: DateOptionsFilter::default(),
            certification_expiration_date: DateOptionsFilter::default(),
        }
    }
}

/// Session date-window filter with nested date sub-filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionDates {
    /// Session start-date sub-filter.
    pub start_date: DateOptionsFilter,
    /// Session end-date sub-filter.
    pub end_date: DateOptionsFilter,
}

// ============================================================================
// SECTION: Enrollment & Boolean Groups
// ============================================================================

/// Enrollment status filter.
///
/// # Invariants
/// - At least one status flag must be true for the document to validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Enrollment {
    /// Completed enrollments.
    pub completed: bool,
    /// In-progress enrollments.
    pub in_progress: bool,
    /// Enrollments never started.
    pub not_started: bool,
    /// Waiting-list enrollments.
    pub waiting_list: bool,
    /// Suspended enrollments.
    pub suspended: bool,
    /// Enrollments pending admin confirmation.
    pub enrollments_to_confirm: bool,
    /// Subscribed (session) enrollments.
    pub subscribed: bool,
    /// Overbooked enrollments.
    pub overbooking: bool,
    /// Active/archived record scope.
    pub enrollment_types: EnrollmentTypes,
}

impl Default for Enrollment {
    fn default() -> Self {
        Self {
            completed: true,
            in_progress: true,
            not_started: true,
            waiting_list: true,
            suspended: true,
            enrollments_to_confirm: true,
            subscribed: true,
            overbooking: true,
            enrollment_types: EnrollmentTypes::Active,
        }
    }
}

impl Enrollment {
    /// True when at least one status flag is set.
    #[must_use]
    pub const fn has_status(&self) -> bool {
        self.completed
            || self.in_progress
            || self.not_started
            || self.waiting_list
            || self.suspended
            || self.enrollments_to_confirm
            || self.subscribed
            || self.overbooking
    }
}

/// External training approval status group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalTrainingStatusFilter {
    /// Approved records.
    pub approved: bool,
    /// Records waiting for approval.
    pub waiting: bool,
    /// Rejected records.
    pub rejected: bool,
}

impl Default for ExternalTrainingStatusFilter {
    fn default() -> Self {
        Self {
            approved: true,
            waiting: true,
            rejected: true,
        }
    }
}

/// Asset publication status group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublishStatus {
    /// Published assets.
    pub published: bool,
    /// Unpublished assets.
    pub unpublished: bool,
}

impl Default for PublishStatus {
    fn default() -> Self {
        Self {
            published: true,
            unpublished: true,
        }
    }
}

/// Session attendance type group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionAttendanceType {
    /// Blended sessions.
    pub blended: bool,
    /// Flexible-attendance sessions.
    pub flexible: bool,
    /// Fully online sessions.
    pub full_online: bool,
    /// Fully on-site sessions.
    pub full_onsite: bool,
}

impl Default for SessionAttendanceType {
    fn default() -> Self {
        Self {
            blended: true,
            flexible: true,
            full_online: true,
            full_onsite: true,
        }
    }
}

// ============================================================================
// SECTION: Query-Builder Conditions
// ============================================================================

/// One query-builder custom filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionValue {
    /// Disabled-condition marker.
    pub any: bool,
    /// Condition operator; text conditions use the text operator set.
    pub operator: String,
    /// Semantic type inherited from the query-builder filter descriptor.
    #[serde(rename = "type")]
    pub filter_type: Option<FilterType>,
    /// Operand value.
    pub value: Option<serde_json::Value>,
}

impl Default for ConditionValue {
    fn default() -> Self {
        Self {
            any: true,
            operator: String::new(),
            filter_type: None,
            value: None,
        }
    }
}

// ============================================================================
// SECTION: Report Info
// ============================================================================

/// Authoritative configuration document for one report.
///
/// # Invariants
/// - `id_report`, `platform`, `author`, `creation_date`, `standard`, `kind`,
///   `deleted`, and the query-builder linkage never change after creation;
///   the update protocol enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInfo {
    /// Report identifier, immutable.
    pub id_report: ReportId,
    /// Tenant platform, immutable.
    pub platform: Platform,
    /// Report kind, immutable.
    #[serde(rename = "type")]
    pub kind: ReportKind,
    /// Built-in (standard) report marker, immutable.
    #[serde(default)]
    pub standard: bool,
    /// Report title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Creating user id, immutable.
    pub author: u64,
    /// Creation stamp, immutable.
    #[serde(default)]
    pub creation_date: String,
    /// Last update stamp, written by the update protocol.
    #[serde(default)]
    pub last_edit: String,
    /// Last editor record, written by the update protocol.
    #[serde(default)]
    pub last_edit_by: LastEditBy,
    /// Soft-delete flag; deleted reports are invisible to the service.
    #[serde(default)]
    pub deleted: bool,
    /// Require login to open the download link.
    #[serde(default)]
    pub login_required: bool,
    /// Download-permission-link feature marker, immutable.
    #[serde(default)]
    pub is_report_download_permission_link_enable: bool,
    /// Display timezone, IANA name.
    #[serde(default)]
    pub timezone: String,
    /// Selected output columns.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Output sorting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting_options: Option<SortingOptions>,
    /// Visibility configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Scheduled delivery block.
    #[serde(default)]
    pub planning: Planning,
    /// Backing query-builder template id, immutable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_builder_id: Option<u64>,
    /// Backing query-builder template name, immutable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_builder_name: Option<String>,
    /// Query-builder custom filter values, keyed by placeholder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<BTreeMap<String, ConditionValue>>,
    /// Selected user additional-field columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_additional_fields_filter: Option<BTreeMap<String, bool>>,
    /// Selected learning-object types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lo_types: Option<BTreeMap<String, bool>>,
    /// Audience filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<UsersFilter>,
    /// Course filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<CoursesFilter>,
    /// Survey filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surveys: Option<EntityFilter>,
    /// Learning-plan filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_plans: Option<EntityFilter>,
    /// Badge filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges: Option<EntityFilter>,
    /// Asset filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<AssetsFilter>,
    /// Session filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<EntityFilter>,
    /// Instructor filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructors: Option<EntityFilter>,
    /// Certification filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<CertificationsFilter>,
    /// Session date-window filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_dates: Option<SessionDates>,
    /// Enrollment status filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<Enrollment>,
    /// External training approval group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_training_status_filter: Option<ExternalTrainingStatusFilter>,
    /// Asset publication group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_status: Option<PublishStatus>,
    /// Session attendance group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attendance_type: Option<SessionAttendanceType>,
    /// Enrollment-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<DateOptionsFilter>,
    /// Completion-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateOptionsFilter>,
    /// Certification/enrollment expiration-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateOptionsFilter>,
    /// Asset published-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateOptionsFilter>,
    /// Enrollment archiving-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archiving_date: Option<DateOptionsFilter>,
    /// Badge issue-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<DateOptionsFilter>,
    /// Survey completion-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_completion_date: Option<DateOptionsFilter>,
    /// External training activity-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_training_date: Option<DateOptionsFilter>,
    /// Contribution published-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_date: Option<DateOptionsFilter>,
    /// Course expiration-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_expiration_date: Option<DateOptionsFilter>,
    /// Last-access-date filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access_date: Option<DateOptionsFilter>,
}

impl ReportInfo {
    /// Builds the kind-specific default document for a new report.
    ///
    /// Filter families required by the report kind start in their defaulted
    /// `all == true` shape; everything else stays absent until patched in.
    #[must_use]
    pub fn new(
        kind: ReportKind,
        key: &ReportKey,
        author: u64,
        title: impl Into<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        let stamp = format_stamp(created_at);
        let mut info = Self {
            id_report: key.report_id.clone(),
            platform: key.platform.clone(),
            kind,
            standard: false,
            title: title.into(),
            description: String::new(),
            author,
            creation_date: stamp.clone(),
            last_edit: stamp,
            last_edit_by: LastEditBy {
                id_user: Some(author),
                ..LastEditBy::default()
            },
            deleted: false,
            login_required: false,
            is_report_download_permission_link_enable: false,
            timezone: String::from("UTC"),
            fields: Vec::new(),
            sorting_options: None,
            visibility: Some(Visibility::default()),
            planning: Planning::default(),
            query_builder_id: None,
            query_builder_name: None,
            conditions: None,
            user_additional_fields_filter: None,
            lo_types: None,
            users: None,
            courses: None,
            surveys: None,
            learning_plans: None,
            badges: None,
            assets: None,
            sessions: None,
            instructors: None,
            certifications: None,
            session_dates: None,
            enrollment: None,
            external_training_status_filter: None,
            publish_status: None,
            session_attendance_type: None,
            enrollment_date: None,
            completion_date: None,
            expiration_date: None,
            published_date: None,
            archiving_date: None,
            issue_date: None,
            survey_completion_date: None,
            external_training_date: None,
            contribution_date: None,
            course_expiration_date: None,
            last_access_date: None,
        };
        if kind.requires_users() {
            info.users = Some(UsersFilter::default());
            info.enrollment = Some(Enrollment::default());
        }
        if kind.requires_courses() {
            info.courses = Some(CoursesFilter::default());
        }
        if kind.requires_certifications() {
            info.certifications = Some(CertificationsFilter::default());
        }
        if kind.requires_instructors() {
            info.instructors = Some(EntityFilter::default());
        }
        if kind.requires_assets() {
            info.assets = Some(AssetsFilter::default());
            info.publish_status = Some(PublishStatus::default());
        }
        info
    }

    /// Returns mutable access to a named date filter, when the name is one of
    /// the recognized filters.
    pub fn date_filter_mut(&mut self, name: &str) -> Option<&mut Option<DateOptionsFilter>> {
        match name {
            "enrollmentDate" => Some(&mut self.enrollment_date),
            "completionDate" => Some(&mut self.completion_date),
            "expirationDate" => Some(&mut self.expiration_date),
            "publishedDate" => Some(&mut self.published_date),
            "archivingDate" => Some(&mut self.archiving_date),
            "issueDate" => Some(&mut self.issue_date),
            "surveyCompletionDate" => Some(&mut self.survey_completion_date),
            "externalTrainingDate" => Some(&mut self.external_training_date),
            "contributionDate" => Some(&mut self.contribution_date),
            "courseExpirationDate" => Some(&mut self.course_expiration_date),
            "lastAccessDate" => Some(&mut self.last_access_date),
            _ => None,
        }
    }

    /// Iterates the set date filters with their wire names.
    pub fn date_filters(&self) -> impl Iterator<Item = (&'static str, &DateOptionsFilter)> {
        [
            ("enrollmentDate", self.enrollment_date.as_ref()),
            ("completionDate", self.completion_date.as_ref()),
            ("expirationDate", self.expiration_date.as_ref()),
            ("publishedDate", self.published_date.as_ref()),
            ("archivingDate", self.archiving_date.as_ref()),
            ("issueDate", self.issue_date.as_ref()),
            ("surveyCompletionDate", self.survey_completion_date.as_ref()),
            ("externalTrainingDate", self.external_training_date.as_ref()),
            ("contributionDate", self.contribution_date.as_ref()),
            ("courseExpirationDate", self.course_expiration_date.as_ref()),
            ("lastAccessDate", self.last_access_date.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, filter)| filter.map(|f| (name, f)))
    }

    /// Returns the report key of this document.
    #[must_use]
    pub fn key(&self) -> ReportKey {
        ReportKey::new(self.id_report.clone(), self.platform.clone())
    }
}

/// Wire names of the recognized date filters, in document order.
pub const DATE_FILTER_NAMES: [&str; 11] = [
    "enrollmentDate",
    "completionDate",
    "expirationDate",
    "publishedDate",
    "archivingDate",
    "issueDate",
    "surveyCompletionDate",
    "externalTrainingDate",
    "contributionDate",
    "courseExpirationDate",
    "lastAccessDate",
];

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::DATE_FILTER_NAMES;
    use super::ReportInfo;
    use crate::core::identifiers::Platform;
    use crate::core::identifiers::ReportId;
    use crate::core::identifiers::ReportKey;
    use crate::core::types::ReportKind;

    /// Key fixture shared by the document tests.
    fn key() -> Result<ReportKey, Box<dyn std::error::Error>> {
        Ok(ReportKey::new(
            ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")?,
            Platform::parse("hydra.example.com")?,
        ))
    }

    #[test]
    fn kind_specific_builder_seeds_required_families() -> Result<(), Box<dyn std::error::Error>> {
        let info = ReportInfo::new(
            ReportKind::UsersCourses,
            &key()?,
            1042,
            "Quarterly completions",
            datetime!(2024-03-05 12:00:00 UTC),
        );
        assert!(info.users.is_some());
        assert!(info.courses.is_some());
        assert!(info.enrollment.is_some());
        assert!(info.assets.is_none());
        assert_eq!(info.creation_date, "2024-03-05 12:00:00");
        assert_eq!(info.last_edit_by.id_user, Some(1042));
        Ok(())
    }

    #[test]
    fn wire_shape_uses_camel_case_names() -> Result<(), Box<dyn std::error::Error>> {
        let info = ReportInfo::new(
            ReportKind::Users,
            &key()?,
            7,
            "All users",
            datetime!(2024-01-01 00:00:00 UTC),
        );
        let value = serde_json::to_value(&info)?;
        assert!(value.get("idReport").is_some());
        assert!(value.get("loginRequired").is_some());
        assert!(value.get("type").is_some());
        assert!(value.get("kind").is_none());
        assert!(value.get("courses").is_none());
        Ok(())
    }

    #[test]
    fn unknown_wire_fields_are_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let info = ReportInfo::new(
            ReportKind::Users,
            &key()?,
            7,
            "All users",
            datetime!(2024-01-01 00:00:00 UTC),
        );
        let mut value = serde_json::to_value(&info)?;
        if let Some(map) = value.as_object_mut() {
            map.insert("notARealField".into(), serde_json::json!(true));
        }
        let roundtrip: ReportInfo = serde_json::from_value(value)?;
        assert_eq!(roundtrip, info);
        Ok(())
    }

    #[test]
    fn every_named_date_filter_is_addressable() -> Result<(), Box<dyn std::error::Error>> {
        let mut info = ReportInfo::new(
            ReportKind::Users,
            &key()?,
            7,
            "All users",
            datetime!(2024-01-01 00:00:00 UTC),
        );
        for name in DATE_FILTER_NAMES {
            assert!(info.date_filter_mut(name).is_some(), "{name} missing");
        }
        assert!(info.date_filter_mut("bogusDate").is_none());
        Ok(())
    }
}
