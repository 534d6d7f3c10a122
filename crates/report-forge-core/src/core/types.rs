// crates/report-forge-core/src/core/types.rs
// ============================================================================
// Module: Report Forge Enumerations
// Description: Report kinds, roles, and closed value sets for validation.
// Purpose: Replace stringly-typed switch fallthrough with tagged variants and
//          fixed allowed-value tables.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The report kind discriminator selects which mandatory-field rules apply to
//! a report document. The remaining enumerations and tables back the
//! membership checks of the patch validator: sorting direction, planning time
//! frames, date operators, enrollment status sets, canonical output columns,
//! and the recognized extra-field column prefixes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Report Kind
// ============================================================================

/// Report kind discriminator.
///
/// # Invariants
/// - Wire names are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportKind {
    /// Flat user listing.
    Users,
    /// Users crossed with course enrollments.
    UsersCourses,
    /// Users crossed with learning objects.
    UsersLearningObject,
    /// Users crossed with certifications.
    UsersCertifications,
    /// Users crossed with external training activities.
    UsersExternalTraining,
    /// Users crossed with badges.
    UsersBadges,
    /// Users crossed with learning plans.
    UsersLearningPlans,
    /// Users crossed with classroom sessions.
    UsersSessions,
    /// Users crossed with webinar sessions.
    UsersWebinarSessions,
    /// Users crossed with informal-learning assets.
    UsersAssets,
    /// Users crossed with survey submissions.
    UsersSurveys,
    /// Per-user enrollment time aggregation.
    UsersEnrollmentTime,
    /// Users crossed with social contributions.
    UsersContributions,
    /// Courses crossed with enrolled users.
    CoursesUsers,
    /// Courses grouped by category.
    CoursesCategories,
    /// Courses crossed with ILT sessions.
    CoursesSessions,
    /// Groups crossed with courses.
    GroupsCourses,
    /// Learning plans crossed with user statistics.
    LearningPlansUsersStatistics,
    /// Learning plan completion statistics.
    LearningPlansStatistics,
    /// Certifications crossed with users.
    CertificationsUsers,
    /// Badges crossed with users.
    BadgesUsers,
    /// E-commerce transaction listing.
    EcommerceTransactions,
    /// Individual survey answer listing.
    SurveysIndividualAnswers,
    /// Session-level user detail.
    SessionsUserDetail,
    /// Session attendance statistics.
    SessionsStatistics,
    /// Instructors crossed with webinar sessions.
    InstructorsWebinarSessions,
    /// Asset engagement statistics.
    AssetsStatistics,
    /// Viewer-level asset details.
    ViewerAssetDetails,
    /// Custom report backed by a query-builder template.
    QueryBuilderDetail,
}

impl ReportKind {
    /// Indicates whether the report is backed by a query-builder template.
    #[must_use]
    pub const fn is_query_builder(self) -> bool {
        matches!(self, Self::QueryBuilderDetail)
    }

    /// Kinds whose documents must carry a `users` filter block.
    #[must_use]
    pub const fn requires_users(self) -> bool {
        matches!(
            self,
            Self::Users
                | Self::UsersCourses
                | Self::UsersLearningObject
                | Self::UsersCertifications
                | Self::UsersExternalTraining
                | Self::UsersBadges
                | Self::UsersLearningPlans
                | Self::UsersSessions
                | Self::UsersWebinarSessions
                | Self::UsersAssets
                | Self::UsersSurveys
                | Self::UsersEnrollmentTime
                | Self::UsersContributions
                | Self::CoursesUsers
                | Self::GroupsCourses
                | Self::CertificationsUsers
                | Self::BadgesUsers
                | Self::SessionsUserDetail
        )
    }

    /// Kinds whose documents must carry a `courses` filter block.
    #[must_use]
    pub const fn requires_courses(self) -> bool {
        matches!(
            self,
            Self::UsersCourses
                | Self::UsersLearningObject
                | Self::UsersEnrollmentTime
                | Self::UsersSessions
                | Self::UsersWebinarSessions
                | Self::CoursesUsers
                | Self::CoursesCategories
                | Self::CoursesSessions
                | Self::GroupsCourses
                | Self::SessionsUserDetail
                | Self::SessionsStatistics
        )
    }

    /// Kinds whose documents must carry a `certifications` filter block.
    #[must_use]
    pub const fn requires_certifications(self) -> bool {
        matches!(self, Self::UsersCertifications | Self::CertificationsUsers)
    }

    /// Kinds whose documents must carry an `instructors` filter block.
    #[must_use]
    pub const fn requires_instructors(self) -> bool {
        matches!(self, Self::UsersWebinarSessions | Self::InstructorsWebinarSessions)
    }

    /// Kinds whose documents must carry an `assets` filter block.
    #[must_use]
    pub const fn requires_assets(self) -> bool {
        matches!(self, Self::UsersAssets | Self::AssetsStatistics | Self::ViewerAssetDetails)
    }
}

// ============================================================================
// SECTION: Caller Role
// ============================================================================

/// Caller role evaluated by the update protocol.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserLevel {
    /// Unrestricted platform administrator.
    Godadmin,
    /// Restricted delegated administrator.
    PowerUser,
    /// Plain learner.
    User,
}

// ============================================================================
// SECTION: Visibility Rule
// ============================================================================

/// Report visibility rule, serialized as its numeric wire value.
///
/// # Invariants
/// - Numeric values are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum VisibilityRule {
    /// Visible to all godadmins only.
    #[default]
    AllGodadmins,
    /// Visible to all godadmins and all power users.
    AllGodadminsAndPu,
    /// Visible to all godadmins and a selected set of power users.
    AllGodadminsAndSelectedPu,
}

impl From<VisibilityRule> for u8 {
    fn from(rule: VisibilityRule) -> Self {
        match rule {
            VisibilityRule::AllGodadmins => 1,
            VisibilityRule::AllGodadminsAndPu => 2,
            VisibilityRule::AllGodadminsAndSelectedPu => 3,
        }
    }
}

impl TryFrom<u8> for VisibilityRule {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::AllGodadmins),
            2 => Ok(Self::AllGodadminsAndPu),
            3 => Ok(Self::AllGodadminsAndSelectedPu),
            other => Err(format!("unknown visibility rule: {other}")),
        }
    }
}

// ============================================================================
// SECTION: Enrollment Types
// ============================================================================

/// Enrollment record scope, serialized as its numeric wire value.
///
/// # Invariants
/// - Numeric values are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EnrollmentTypes {
    /// Active enrollments only.
    #[default]
    Active,
    /// Archived enrollments only.
    Archived,
    /// Both active and archived enrollments.
    Both,
}

impl From<EnrollmentTypes> for u8 {
    fn from(types: EnrollmentTypes) -> Self {
        match types {
            EnrollmentTypes::Active => 1,
            EnrollmentTypes::Archived => 2,
            EnrollmentTypes::Both => 3,
        }
    }
}

impl TryFrom<u8> for EnrollmentTypes {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Self::Active),
            2 => Ok(Self::Archived),
            3 => Ok(Self::Both),
            other => Err(format!("unknown enrollment types value: {other}")),
        }
    }
}

// ============================================================================
// SECTION: Date Operators
// ============================================================================

/// Date filter operator parsed from its wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOperator {
    /// Match dates strictly after the anchor.
    IsAfter,
    /// Match dates strictly before the anchor.
    IsBefore,
    /// Match dates within an inclusive day range.
    Range,
    /// Match dates expiring within a day count.
    ExpiringIn,
}

impl DateOperator {
    /// Parses the wire name of a date operator.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "isAfter" => Some(Self::IsAfter),
            "isBefore" => Some(Self::IsBefore),
            "range" => Some(Self::Range),
            "expiringIn" => Some(Self::ExpiringIn),
            _ => None,
        }
    }
}

/// Anchor kind for `isAfter`/`isBefore` date operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAnchorKind {
    /// Anchor expressed as a day count relative to today.
    Relative,
    /// Anchor expressed as an absolute date.
    Absolute,
}

impl DateAnchorKind {
    /// Parses the wire name of a date anchor kind.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "relative" => Some(Self::Relative),
            "absolute" => Some(Self::Absolute),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Allowed Value Tables
// ============================================================================

/// Planning repetition time frames.
pub const TIME_FRAMES: [&str; 3] = ["day", "week", "month"];

/// Sorting directions.
pub const ORDER_BY_VALUES: [&str; 2] = ["asc", "desc"];

/// Sorting selector modes.
pub const SORT_SELECTORS: [&str; 2] = ["default", "custom"];

/// Recognized operators for text-typed query-builder conditions.
pub const TEXT_OPERATORS: [&str; 6] =
    ["contains", "notContains", "equals", "notEquals", "startsWith", "endsWith"];

/// Recognized extra-field column prefixes (`<prefix><positive-int>`).
pub const EXTRA_FIELD_PREFIXES: [&str; 7] = [
    "user_extrafield_",
    "course_extrafield_",
    "courseuser_extrafield_",
    "lp_extrafield_",
    "classroom_extrafield_",
    "webinar_extrafield_",
    "external_activity_extrafield_",
];

/// Canonical output columns selectable by `fields`.
pub const REPORT_FIELDS: [&str; 73] = [
    "asset.channels",
    "asset.name",
    "asset.publishedBy",
    "asset.publishedOn",
    "asset.type",
    "badge.description",
    "badge.issuedOn",
    "badge.name",
    "badge.score",
    "certification.code",
    "certification.description",
    "certification.duration",
    "certification.expirationDate",
    "certification.issueDate",
    "certification.name",
    "certification.status",
    "contribution.publishedOn",
    "contribution.title",
    "contribution.type",
    "course.category",
    "course.code",
    "course.creationDate",
    "course.credits",
    "course.duration",
    "course.endDate",
    "course.expirationDate",
    "course.language",
    "course.name",
    "course.startDate",
    "course.status",
    "course.type",
    "course.uniqueId",
    "enrollment.completionDate",
    "enrollment.credits",
    "enrollment.date",
    "enrollment.lastAccessDate",
    "enrollment.score",
    "enrollment.status",
    "enrollment.timeInCourse",
    "externalTraining.completionDate",
    "externalTraining.courseName",
    "externalTraining.courseType",
    "externalTraining.credits",
    "externalTraining.score",
    "externalTraining.status",
    "group.name",
    "lo.completionDate",
    "lo.firstAttempt",
    "lo.score",
    "lo.status",
    "lo.title",
    "lo.type",
    "lp.code",
    "lp.completionPercentage",
    "lp.creationDate",
    "lp.credits",
    "lp.name",
    "session.endDate",
    "session.evaluationScore",
    "session.instructorList",
    "session.name",
    "session.startDate",
    "session.timeInSession",
    "survey.completionDate",
    "survey.title",
    "user.branchName",
    "user.branchPath",
    "user.deactivated",
    "user.email",
    "user.firstname",
    "user.fullname",
    "user.lastname",
    "user.username",
];

/// Checks whether an output column is canonical or extra-field shaped.
#[must_use]
pub fn is_valid_report_field(name: &str) -> bool {
    if REPORT_FIELDS.binary_search(&name).is_ok() {
        return true;
    }
    EXTRA_FIELD_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .is_some_and(|suffix| suffix.parse::<u64>().is_ok_and(|id| id > 0))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::EXTRA_FIELD_PREFIXES;
    use super::REPORT_FIELDS;
    use super::ReportKind;
    use super::is_valid_report_field;

    #[test]
    fn report_fields_table_is_sorted_for_binary_search() {
        let mut sorted = REPORT_FIELDS;
        sorted.sort_unstable();
        assert_eq!(sorted, REPORT_FIELDS);
    }

    #[test]
    fn canonical_and_extrafield_columns_are_accepted() {
        assert!(is_valid_report_field("user.username"));
        assert!(is_valid_report_field("user_extrafield_12"));
        assert!(is_valid_report_field("webinar_extrafield_3"));
        assert!(!is_valid_report_field("user_extrafield_0"));
        assert!(!is_valid_report_field("user_extrafield_abc"));
        assert!(!is_valid_report_field("user.shoeSize"));
    }

    #[test]
    fn extrafield_prefixes_stay_distinct() {
        for (index, prefix) in EXTRA_FIELD_PREFIXES.iter().enumerate() {
            for other in &EXTRA_FIELD_PREFIXES[index + 1 ..] {
                assert_ne!(prefix, other);
            }
        }
    }

    #[test]
    fn kind_rules_select_required_blocks() {
        assert!(ReportKind::UsersCourses.requires_users());
        assert!(ReportKind::UsersCourses.requires_courses());
        assert!(!ReportKind::UsersCourses.requires_assets());
        assert!(ReportKind::CertificationsUsers.requires_certifications());
        assert!(ReportKind::UsersWebinarSessions.requires_instructors());
        assert!(ReportKind::AssetsStatistics.requires_assets());
        assert!(ReportKind::QueryBuilderDetail.is_query_builder());
        assert!(!ReportKind::QueryBuilderDetail.requires_users());
    }
}
