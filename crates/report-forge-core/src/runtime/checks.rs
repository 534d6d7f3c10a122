// crates/report-forge-core/src/runtime/checks.rs
// ============================================================================
// Module: Post-Merge Invariant Checks
// Description: Cross-field validation of a merged report document.
// Purpose: Gate every commit, for patches and full replaces alike, so no
//          invalid document is ever observable.
// Dependencies: none beyond the core model
// ============================================================================

//! ## Overview
//! [`run_post_merge_checks`] runs the five cross-field check groups in a
//! fixed order and fails fast on the first violation: filter selections,
//! date-filter consistency, enrollment status flags, mandatory fields, and
//! the per-kind required blocks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use query_filter::FilterType;

use crate::core::info::DateOptionsFilter;
use crate::core::info::ReportInfo;
use crate::core::time::day_range_is_ordered;
use crate::core::time::parse_date;
use crate::core::types::DateAnchorKind;
use crate::core::types::DateOperator;
use crate::core::types::TEXT_OPERATORS;
use crate::core::types::VisibilityRule;
use crate::runtime::error::ReportError;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs every post-merge check group against a candidate document.
///
/// # Errors
///
/// Returns the first [`ReportError`] violation found.
pub fn run_post_merge_checks(info: &ReportInfo, datalake_v2: bool) -> Result<(), ReportError> {
    check_filters(info)?;
    check_date_options(info)?;
    check_enrollment(info)?;
    check_mandatory_fields(info, datalake_v2)?;
    check_mandatory_fields_for_kind(info)?;
    Ok(())
}

// ============================================================================
// SECTION: Filter Selections
// ============================================================================

/// Every family that narrows its selection must actually select something.
fn check_filters(info: &ReportInfo) -> Result<(), ReportError> {
    if let Some(visibility) = &info.visibility
        && visibility.rule == VisibilityRule::AllGodadminsAndSelectedPu
        && !visibility.has_selection()
    {
        return Err(ReportError::invalid("visibility.type"));
    }
    if let Some(users) = &info.users
        && !users.all
        && users.users.is_empty()
        && users.groups.is_empty()
        && users.branches.is_empty()
    {
        return Err(ReportError::invalid("users.all"));
    }
    if let Some(courses) = &info.courses
        && !courses.all
        && courses.courses.is_empty()
        && courses.learning_plans.is_empty()
    {
        return Err(ReportError::invalid("courses.all"));
    }
    for (name, family) in [
        ("surveys", &info.surveys),
        ("learningPlans", &info.learning_plans),
        ("badges", &info.badges),
        ("sessions", &info.sessions),
        ("instructors", &info.instructors),
    ] {
        if let Some(family) = family
            && !family.all
            && family.entities.is_empty()
        {
            return Err(ReportError::invalid(format!("{name}.all")));
        }
    }
    if let Some(assets) = &info.assets
        && !assets.all
        && assets.assets.is_empty()
        && assets.channels.is_empty()
    {
        return Err(ReportError::invalid("assets.all"));
    }
    if let Some(certifications) = &info.certifications
        && !certifications.all
        && certifications.certifications.is_empty()
    {
        return Err(ReportError::invalid("certifications.all"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Date Filters
// ============================================================================

/// Validates every set date filter, including the nested certification and
/// session-date sub-filters.
fn check_date_options(info: &ReportInfo) -> Result<(), ReportError> {
    for (name, filter) in info.date_filters() {
        check_one_date_filter(name, filter)?;
    }
    if let Some(certifications) = &info.certifications {
        check_one_date_filter(
            "certifications.certificationDate",
            &certifications.certification_date,
        )?;
        check_one_date_filter(
            "certifications.certificationExpirationDate",
            &certifications.certification_expiration_date,
        )?;
    }
    if let Some(session_dates) = &info.session_dates {
        check_one_date_filter("sessionDates.startDate", &session_dates.start_date)?;
        check_one_date_filter("sessionDates.endDate", &session_dates.end_date)?;
    }
    Ok(())
}

/// One active date filter must be internally consistent for its operator.
fn check_one_date_filter(name: &str, filter: &DateOptionsFilter) -> Result<(), ReportError> {
    if filter.any {
        return Ok(());
    }
    let operator = DateOperator::parse(&filter.operator)
        .ok_or_else(|| ReportError::invalid(format!("{name}.operator")))?;
    match operator {
        DateOperator::IsAfter | DateOperator::IsBefore => {
            let anchor = DateAnchorKind::parse(&filter.kind)
                .ok_or_else(|| ReportError::invalid(format!("{name}.type")))?;
            match anchor {
                DateAnchorKind::Relative if filter.days == 0 => {
                    Err(ReportError::invalid(format!("{name}.days")))
                }
                DateAnchorKind::Absolute if parse_date(&filter.to).is_none() => {
                    Err(ReportError::invalid(format!("{name}.to")))
                }
                _ => Ok(()),
            }
        }
        DateOperator::Range => {
            let from = parse_date(&filter.from)
                .ok_or_else(|| ReportError::invalid(format!("{name}.from")))?;
            let to = parse_date(&filter.to)
                .ok_or_else(|| ReportError::invalid(format!("{name}.from")))?;
            if day_range_is_ordered(from, to) {
                Ok(())
            } else {
                Err(ReportError::invalid(format!("{name}.from")))
            }
        }
        DateOperator::ExpiringIn => {
            if filter.days == 0 {
                Err(ReportError::invalid(format!("{name}.days")))
            } else {
                Ok(())
            }
        }
    }
}

// ============================================================================
// SECTION: Enrollment
// ============================================================================

/// An enrollment filter with no status flags selects nothing.
fn check_enrollment(info: &ReportInfo) -> Result<(), ReportError> {
    if let Some(enrollment) = &info.enrollment
        && !enrollment.has_status()
    {
        return Err(ReportError::invalid("enrollment"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Mandatory Fields
// ============================================================================

/// Title, author, output columns, and visibility are always mandatory;
/// active planning additionally needs recipients, and datalake-v2 tenants
/// need a start hour.
fn check_mandatory_fields(info: &ReportInfo, datalake_v2: bool) -> Result<(), ReportError> {
    if info.title.trim().is_empty() {
        return Err(ReportError::mandatory("title"));
    }
    if info.author == 0 {
        return Err(ReportError::mandatory("author"));
    }
    if info.fields.is_empty() {
        return Err(ReportError::mandatory("fields"));
    }
    if info.visibility.is_none() {
        return Err(ReportError::mandatory("visibility"));
    }
    if info.planning.active {
        if info.planning.option.recipients.is_empty() {
            return Err(ReportError::mandatory("planning.option.recipients"));
        }
        if datalake_v2
            && info.planning.option.start_hour.as_deref().is_none_or(str::is_empty)
        {
            return Err(ReportError::mandatory("planning.option.startHour"));
        }
    }
    Ok(())
}

/// Per-kind required blocks plus the query-builder condition rule.
fn check_mandatory_fields_for_kind(info: &ReportInfo) -> Result<(), ReportError> {
    let kind = info.kind;
    if kind.requires_users() && info.users.is_none() {
        return Err(ReportError::mandatory("users"));
    }
    if kind.requires_courses() && info.courses.is_none() {
        return Err(ReportError::mandatory("courses"));
    }
    if kind.requires_certifications() && info.certifications.is_none() {
        return Err(ReportError::mandatory("certifications"));
    }
    if kind.requires_instructors() && info.instructors.is_none() {
        return Err(ReportError::mandatory("instructors"));
    }
    if kind.requires_assets() && info.assets.is_none() {
        return Err(ReportError::mandatory("assets"));
    }
    if kind.is_query_builder()
        && let Some(conditions) = &info.conditions
    {
        for (name, condition) in conditions {
            if condition.filter_type == Some(FilterType::Text)
                && !condition.any
                && !TEXT_OPERATORS.contains(&condition.operator.as_str())
            {
                return Err(ReportError::invalid(format!("conditions.{name}.operator")));
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
