// crates/report-forge-core/src/runtime/validator.rs
// ============================================================================
// Module: Patch Validator
// Description: Declarative field-by-field validation of report updates.
// Purpose: Reject immutable-field edits and malformed values before any
//          merge, producing a typed sparse patch.
// Dependencies: regex, serde_json, query-filter
// ============================================================================

//! ## Overview
//! [`validate_update`] runs the pre-merge half of the update protocol. For
//! full replaces only the platform and `loginRequired` rules apply here; the
//! post-merge invariant checks validate the replacement document. For patches
//! it rejects immutable-field edits, then walks every known path of the
//! payload with per-type checkers and parses the result into a
//! [`ReportPatch`]. Missing fields always pass (patches are sparse); explicit
//! `null` always fails. Fields outside the whitelist are ignored entirely.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::LazyLock;

use query_filter::FilterType;
use regex::Regex;
use serde_json::Map;
use serde_json::Value;

use crate::core::info::ConditionValue;
use crate::core::info::DATE_FILTER_NAMES;
use crate::core::info::ReportInfo;
use crate::core::info::SelectionRef;
use crate::core::time::is_full_hour;
use crate::core::time::is_iana_timezone;
use crate::core::time::parse_date;
use crate::core::types::EnrollmentTypes;
use crate::core::types::ORDER_BY_VALUES;
use crate::core::types::SORT_SELECTORS;
use crate::core::types::TIME_FRAMES;
use crate::core::types::UserLevel;
use crate::core::types::VisibilityRule;
use crate::core::types::is_valid_report_field;
use crate::runtime::error::ReportError;
use crate::runtime::patch::AssetsFilterPatch;
use crate::runtime::patch::CertificationsFilterPatch;
use crate::runtime::patch::CoursesFilterPatch;
use crate::runtime::patch::DateFilterPatch;
use crate::runtime::patch::EnrollmentPatch;
use crate::runtime::patch::EntityFilterPatch;
use crate::runtime::patch::ExternalTrainingStatusPatch;
use crate::runtime::patch::PlanningOptionPatch;
use crate::runtime::patch::PlanningPatch;
use crate::runtime::patch::PublishStatusPatch;
use crate::runtime::patch::ReportPatch;
use crate::runtime::patch::SessionAttendancePatch;
use crate::runtime::patch::SessionDatesPatch;
use crate::runtime::patch::SortingOptionsPatch;
use crate::runtime::patch::UsersFilterPatch;
use crate::runtime::patch::VisibilityPatch;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fields no patch may change after creation.
pub const IMMUTABLE_FIELDS: [&str; 12] = [
    "deleted",
    "queryBuilderId",
    "queryBuilderName",
    "author",
    "creationDate",
    "lastEdit",
    "lastEditBy",
    "standard",
    "type",
    "platform",
    "idReport",
    "isReportDownloadPermissionLinkEnable",
];

/// Recipient address shape check.
#[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Validates an incoming update against the current document.
///
/// Returns `Ok(Some(patch))` for patch updates and `Ok(None)` for full
/// replaces, whose body is validated post-merge.
///
/// # Errors
///
/// Returns the first [`ReportError`] violation found; the document is never
/// touched by this function.
pub fn validate_update(
    current: &ReportInfo,
    user_level: UserLevel,
    download_link_enabled: bool,
    is_patch: bool,
    data: &Value,
) -> Result<Option<ReportPatch>, ReportError> {
    let map = data.as_object().ok_or_else(ReportError::generic)?;
    check_platform(current, map)?;
    check_login_required_guard(current, user_level, download_link_enabled, map)?;
    if !is_patch {
        return Ok(None);
    }
    check_immutable_fields(current, map)?;
    let patch = parse_patch(map)?;
    check_output_columns(current, &patch)?;
    Ok(Some(patch))
}

// ============================================================================
// SECTION: Pre-Merge Guards
// ============================================================================

/// Rejects any attempt to move a report between platforms.
fn check_platform(current: &ReportInfo, map: &Map<String, Value>) -> Result<(), ReportError> {
    match map.get("platform") {
        None => Ok(()),
        Some(Value::String(platform)) if platform == current.platform.as_str() => Ok(()),
        Some(_) => Err(ReportError::invalid("platform")),
    }
}

/// Power users may not toggle `loginRequired` while the download-permission
/// link feature is off.
fn check_login_required_guard(
    current: &ReportInfo,
    user_level: UserLevel,
    download_link_enabled: bool,
    map: &Map<String, Value>,
) -> Result<(), ReportError> {
    if user_level != UserLevel::PowerUser || download_link_enabled {
        return Ok(());
    }
    match map.get("loginRequired") {
        Some(value) if *value != Value::Bool(current.login_required) => {
            Err(ReportError::not_editable("loginRequired"))
        }
        _ => Ok(()),
    }
}

/// Rejects patches that set an immutable field to a different value.
fn check_immutable_fields(
    current: &ReportInfo,
    map: &Map<String, Value>,
) -> Result<(), ReportError> {
    let snapshot = serde_json::to_value(current).map_err(|_| ReportError::generic())?;
    for name in IMMUTABLE_FIELDS {
        let Some(incoming) = map.get(name) else {
            continue;
        };
        let existing = snapshot.get(name).unwrap_or(&Value::Null);
        if incoming != existing {
            return Err(ReportError::not_editable(name));
        }
    }
    Ok(())
}

/// Output columns must be canonical or extrafield-shaped, and the active sort
/// column must be among the selected columns. Query-builder reports carry
/// template-defined columns and skip both rules.
fn check_output_columns(current: &ReportInfo, patch: &ReportPatch) -> Result<(), ReportError> {
    if current.kind.is_query_builder() {
        return Ok(());
    }
    let effective_fields = patch.fields.as_ref().unwrap_or(&current.fields);
    for field in effective_fields {
        if !is_valid_report_field(field) {
            return Err(ReportError::invalid("fields"));
        }
    }
    let patched_sort =
        patch.sorting_options.as_ref().and_then(|sorting| sorting.selected_field.as_deref());
    let current_sort =
        current.sorting_options.as_ref().map(|sorting| sorting.selected_field.as_str());
    if let Some(sort_field) = patched_sort.or(current_sort)
        && !sort_field.is_empty()
        && !effective_fields.iter().any(|field| field == sort_field)
    {
        return Err(ReportError::invalid("sortingOptions.selectedField"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Field Checkers
// ============================================================================

/// Missing passes, `null` and wrong types fail.
fn opt_bool(map: &Map<String, Value>, key: &str, path: &str) -> Result<Option<bool>, ReportError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// String checker; missing passes, `null` and wrong types fail.
fn opt_string(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, ReportError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// Strictly positive integer checker.
fn opt_positive(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<u64>, ReportError> {
    match map.get(key) {
        None => Ok(None),
        Some(value) => match value.as_u64() {
            Some(number) if number > 0 => Ok(Some(number)),
            _ => Err(ReportError::invalid(path)),
        },
    }
}

/// ISO-parseable date checker; the empty string clears the field.
fn opt_iso_date(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, ReportError> {
    match opt_string(map, key, path)? {
        None => Ok(None),
        Some(text) if text.is_empty() || parse_date(&text).is_some() => Ok(Some(text)),
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// IANA timezone checker.
fn opt_timezone(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, ReportError> {
    match opt_string(map, key, path)? {
        None => Ok(None),
        Some(text) if is_iana_timezone(&text) => Ok(Some(text)),
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// `HH:00` start-hour checker.
fn opt_start_hour(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, ReportError> {
    match opt_string(map, key, path)? {
        None => Ok(None),
        Some(text) if is_full_hour(&text) => Ok(Some(text)),
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// Enumerated-string checker.
fn opt_enum(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
    allowed: &[&str],
) -> Result<Option<String>, ReportError> {
    match opt_string(map, key, path)? {
        None => Ok(None),
        Some(text) if allowed.contains(&text.as_str()) => Ok(Some(text)),
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// String-array checker.
fn opt_string_array(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<Vec<String>>, ReportError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(text) => out.push(text.clone()),
                    _ => return Err(ReportError::invalid(path)),
                }
            }
            Ok(Some(out))
        }
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// Regex-validated e-mail array checker.
fn opt_email_array(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<Vec<String>>, ReportError> {
    match opt_string_array(map, key, path)? {
        None => Ok(None),
        Some(addresses) => {
            if addresses.iter().all(|address| EMAIL_RE.is_match(address)) {
                Ok(Some(addresses))
            } else {
                Err(ReportError::invalid(path))
            }
        }
    }
}

/// `{id, descendants?}` array checker.
fn opt_selection_array(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<Vec<SelectionRef>>, ReportError> {
    let Some(value) = map.get(key) else {
        return Ok(None);
    };
    let Value::Array(items) = value else {
        return Err(ReportError::invalid(path));
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let entry = item.as_object().ok_or_else(|| ReportError::invalid(path))?;
        let id = match entry.get("id").and_then(Value::as_u64) {
            Some(id) if id > 0 => id,
            _ => return Err(ReportError::invalid(path)),
        };
        let descendants = match entry.get("descendants") {
            None => None,
            Some(Value::Bool(flag)) => Some(*flag),
            Some(_) => return Err(ReportError::invalid(path)),
        };
        out.push(SelectionRef {
            id,
            descendants,
        });
    }
    Ok(Some(out))
}

/// Nested-object accessor; missing passes, `null` and non-objects fail.
fn opt_object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>, ReportError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Object(sub)) => Ok(Some(sub)),
        Some(_) => Err(ReportError::invalid(path)),
    }
}

/// Object-of-booleans checker for selection maps.
fn opt_bool_map(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<BTreeMap<String, bool>>, ReportError> {
    match opt_object(map, key, path)? {
        None => Ok(None),
        Some(sub) => {
            let mut out = BTreeMap::new();
            for (name, value) in sub {
                let Value::Bool(flag) = value else {
                    return Err(ReportError::invalid(path));
                };
                out.insert(name.clone(), *flag);
            }
            Ok(Some(out))
        }
    }
}

// ============================================================================
// SECTION: Composite Parsers
// ============================================================================

/// Parses the whole patch body into its typed sparse form.
fn parse_patch(map: &Map<String, Value>) -> Result<ReportPatch, ReportError> {
    let mut patch = ReportPatch {
        login_required: opt_bool(map, "loginRequired", "loginRequired")?,
        description: opt_string(map, "description", "description")?,
        title: opt_string(map, "title", "title")?,
        timezone: opt_timezone(map, "timezone", "timezone")?,
        fields: opt_string_array(map, "fields", "fields")?,
        conditions: parse_conditions(map)?,
        user_additional_fields_filter: opt_bool_map(
            map,
            "userAdditionalFieldsFilter",
            "userAdditionalFieldsFilter",
        )?,
        lo_types: opt_bool_map(map, "loTypes", "loTypes")?,
        ..ReportPatch::default()
    };
    if let Some(sub) = opt_object(map, "sortingOptions", "sortingOptions")? {
        patch.sorting_options = Some(parse_sorting(sub)?);
    }
    if let Some(sub) = opt_object(map, "visibility", "visibility")? {
        patch.visibility = Some(parse_visibility(sub)?);
    }
    if let Some(sub) = opt_object(map, "planning", "planning")? {
        patch.planning = Some(parse_planning(sub)?);
    }
    if let Some(sub) = opt_object(map, "users", "users")? {
        patch.users = Some(parse_users(sub)?);
    }
    if let Some(sub) = opt_object(map, "courses", "courses")? {
        patch.courses = Some(parse_courses(sub)?);
    }
    patch.surveys = parse_entity(map, "surveys", "surveys")?;
    patch.learning_plans = parse_entity(map, "learningPlans", "learningPlans")?;
    patch.badges = parse_entity(map, "badges", "badges")?;
    patch.sessions = parse_entity(map, "sessions", "sessions")?;
    patch.instructors = parse_entity(map, "instructors", "instructors")?;
    if let Some(sub) = opt_object(map, "assets", "assets")? {
        patch.assets = Some(parse_assets(sub)?);
    }
    if let Some(sub) = opt_object(map, "certifications", "certifications")? {
        patch.certifications = Some(parse_certifications(sub)?);
    }
    if let Some(sub) = opt_object(map, "sessionDates", "sessionDates")? {
        patch.session_dates = Some(parse_session_dates(sub)?);
    }
    if let Some(sub) = opt_object(map, "enrollment", "enrollment")? {
        patch.enrollment = Some(parse_enrollment(sub)?);
    }
    if let Some(sub) =
        opt_object(map, "externalTrainingStatusFilter", "externalTrainingStatusFilter")?
    {
        patch.external_training_status_filter = Some(ExternalTrainingStatusPatch {
            approved: opt_bool(sub, "approved", "externalTrainingStatusFilter.approved")?,
            waiting: opt_bool(sub, "waiting", "externalTrainingStatusFilter.waiting")?,
            rejected: opt_bool(sub, "rejected", "externalTrainingStatusFilter.rejected")?,
        });
    }
    if let Some(sub) = opt_object(map, "publishStatus", "publishStatus")? {
        patch.publish_status = Some(PublishStatusPatch {
            published: opt_bool(sub, "published", "publishStatus.published")?,
            unpublished: opt_bool(sub, "unpublished", "publishStatus.unpublished")?,
        });
    }
    if let Some(sub) = opt_object(map, "sessionAttendanceType", "sessionAttendanceType")? {
        patch.session_attendance_type = Some(SessionAttendancePatch {
            blended: opt_bool(sub, "blended", "sessionAttendanceType.blended")?,
            flexible: opt_bool(sub, "flexible", "sessionAttendanceType.flexible")?,
            full_online: opt_bool(sub, "fullOnline", "sessionAttendanceType.fullOnline")?,
            full_onsite: opt_bool(sub, "fullOnsite", "sessionAttendanceType.fullOnsite")?,
        });
    }
    for name in DATE_FILTER_NAMES {
        if let Some(sub) = opt_object(map, name, name)? {
            patch.date_filters.insert(name.to_string(), parse_date_filter(sub, name)?);
        }
    }
    Ok(patch)
}

/// Sorting options: enumerated selector and direction.
fn parse_sorting(sub: &Map<String, Value>) -> Result<SortingOptionsPatch, ReportError> {
    Ok(SortingOptionsPatch {
        selector: opt_enum(sub, "selector", "sortingOptions.selector", &SORT_SELECTORS)?,
        selected_field: opt_string(sub, "selectedField", "sortingOptions.selectedField")?,
        order_by: opt_enum(sub, "orderBy", "sortingOptions.orderBy", &ORDER_BY_VALUES)?,
    })
}

/// Visibility: numeric rule plus three selection lists.
fn parse_visibility(sub: &Map<String, Value>) -> Result<VisibilityPatch, ReportError> {
    let rule = match sub.get("type") {
        None => None,
        Some(value) => {
            let number = value.as_u64().ok_or_else(|| ReportError::invalid("visibility.type"))?;
            let raw = u8::try_from(number).map_err(|_| ReportError::invalid("visibility.type"))?;
            Some(
                VisibilityRule::try_from(raw)
                    .map_err(|_| ReportError::invalid("visibility.type"))?,
            )
        }
    };
    Ok(VisibilityPatch {
        rule,
        users: opt_selection_array(sub, "users", "visibility.users")?,
        groups: opt_selection_array(sub, "groups", "visibility.groups")?,
        branches: opt_selection_array(sub, "branches", "visibility.branches")?,
    })
}

/// Planning block with its composite option sub-document.
fn parse_planning(sub: &Map<String, Value>) -> Result<PlanningPatch, ReportError> {
    let option = match opt_object(sub, "option", "planning.option")? {
        None => None,
        Some(option) => Some(PlanningOptionPatch {
            every: opt_positive(option, "every", "planning.option.every")?,
            time_frame: opt_enum(option, "timeFrame", "planning.option.timeFrame", &TIME_FRAMES)?,
            recipients: opt_email_array(option, "recipients", "planning.option.recipients")?,
            schedule_from: opt_iso_date(option, "scheduleFrom", "planning.option.scheduleFrom")?,
            start_hour: opt_start_hour(option, "startHour", "planning.option.startHour")?,
            timezone: opt_timezone(option, "timezone", "planning.option.timezone")?,
        }),
    };
    Ok(PlanningPatch {
        active: opt_bool(sub, "active", "planning.active")?,
        option,
    })
}

/// One date-filter sub-document; operator membership checks run post-merge.
fn parse_date_filter(
    sub: &Map<String, Value>,
    prefix: &str,
) -> Result<DateFilterPatch, ReportError> {
    Ok(DateFilterPatch {
        any: opt_bool(sub, "any", &format!("{prefix}.any"))?,
        operator: opt_string(sub, "operator", &format!("{prefix}.operator"))?,
        kind: opt_string(sub, "type", &format!("{prefix}.type"))?,
        from: opt_iso_date(sub, "from", &format!("{prefix}.from"))?,
        to: opt_iso_date(sub, "to", &format!("{prefix}.to"))?,
        days: opt_positive(sub, "days", &format!("{prefix}.days"))?,
    })
}

/// Audience family.
fn parse_users(sub: &Map<String, Value>) -> Result<UsersFilterPatch, ReportError> {
    Ok(UsersFilterPatch {
        all: opt_bool(sub, "all", "users.all")?,
        hide_deactivated: opt_bool(sub, "hideDeactivated", "users.hideDeactivated")?,
        show_only_learners: opt_bool(sub, "showOnlyLearners", "users.showOnlyLearners")?,
        hide_expired_users: opt_bool(sub, "hideExpiredUsers", "users.hideExpiredUsers")?,
        is_user_add_fields: opt_bool(sub, "isUserAddFields", "users.isUserAddFields")?,
        users: opt_selection_array(sub, "users", "users.users")?,
        groups: opt_selection_array(sub, "groups", "users.groups")?,
        branches: opt_selection_array(sub, "branches", "users.branches")?,
    })
}

/// Course family.
fn parse_courses(sub: &Map<String, Value>) -> Result<CoursesFilterPatch, ReportError> {
    Ok(CoursesFilterPatch {
        all: opt_bool(sub, "all", "courses.all")?,
        courses: opt_selection_array(sub, "courses", "courses.courses")?,
        learning_plans: opt_selection_array(sub, "learningPlans", "courses.learningPlans")?,
    })
}

/// Single-list families share one shape; the id-list key matches the family
/// name on the wire.
fn parse_entity(
    map: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<EntityFilterPatch>, ReportError> {
    match opt_object(map, key, path)? {
        None => Ok(None),
        Some(sub) => Ok(Some(EntityFilterPatch {
            all: opt_bool(sub, "all", &format!("{path}.all"))?,
            entities: opt_selection_array(sub, key, &format!("{path}.{key}"))?,
        })),
    }
}

/// Asset family.
fn parse_assets(sub: &Map<String, Value>) -> Result<AssetsFilterPatch, ReportError> {
    Ok(AssetsFilterPatch {
        all: opt_bool(sub, "all", "assets.all")?,
        assets: opt_selection_array(sub, "assets", "assets.assets")?,
        channels: opt_selection_array(sub, "channels", "assets.channels")?,
    })
}

/// Certification family with nested date sub-filters.
fn parse_certifications(
    sub: &Map<String, Value>,
) -> Result<CertificationsFilterPatch, ReportError> {
    let certification_date =
        match opt_object(sub, "certificationDate", "certifications.certificationDate")? {
            None => None,
            Some(date) => Some(parse_date_filter(date, "certifications.certificationDate")?),
        };
    let certification_expiration_date = match opt_object(
        sub,
        "certificationExpirationDate",
        "certifications.certificationExpirationDate",
    )? {
        None => None,
        Some(date) => {
            Some(parse_date_filter(date, "certifications.certificationExpirationDate")?)
        }
    };
    Ok(CertificationsFilterPatch {
        all: opt_bool(sub, "all", "certifications.all")?,
        active_certifications: opt_bool(
            sub,
            "activeCertifications",
            "certifications.activeCertifications",
        )?,
        expired_certifications: opt_bool(
            sub,
            "expiredCertifications",
            "certifications.expiredCertifications",
        )?,
        archived_certifications: opt_bool(
            sub,
            "archivedCertifications",
            "certifications.archivedCertifications",
        )?,
        certifications: opt_selection_array(
            sub,
            "certifications",
            "certifications.certifications",
        )?,
        certification_date,
        certification_expiration_date,
    })
}

/// Session date-window family.
fn parse_session_dates(sub: &Map<String, Value>) -> Result<SessionDatesPatch, ReportError> {
    let start_date = match opt_object(sub, "startDate", "sessionDates.startDate")? {
        None => None,
        Some(date) => Some(parse_date_filter(date, "sessionDates.startDate")?),
    };
    let end_date = match opt_object(sub, "endDate", "sessionDates.endDate")? {
        None => None,
        Some(date) => Some(parse_date_filter(date, "sessionDates.endDate")?),
    };
    Ok(SessionDatesPatch {
        start_date,
        end_date,
    })
}

/// Enrollment status flags plus the numeric record scope.
fn parse_enrollment(sub: &Map<String, Value>) -> Result<EnrollmentPatch, ReportError> {
    let enrollment_types = match sub.get("enrollmentTypes") {
        None => None,
        Some(value) => {
            let number =
                value.as_u64().ok_or_else(|| ReportError::invalid("enrollment.enrollmentTypes"))?;
            let raw = u8::try_from(number)
                .map_err(|_| ReportError::invalid("enrollment.enrollmentTypes"))?;
            Some(
                EnrollmentTypes::try_from(raw)
                    .map_err(|_| ReportError::invalid("enrollment.enrollmentTypes"))?,
            )
        }
    };
    Ok(EnrollmentPatch {
        completed: opt_bool(sub, "completed", "enrollment.completed")?,
        in_progress: opt_bool(sub, "inProgress", "enrollment.inProgress")?,
        not_started: opt_bool(sub, "notStarted", "enrollment.notStarted")?,
        waiting_list: opt_bool(sub, "waitingList", "enrollment.waitingList")?,
        suspended: opt_bool(sub, "suspended", "enrollment.suspended")?,
        enrollments_to_confirm: opt_bool(
            sub,
            "enrollmentsToConfirm",
            "enrollment.enrollmentsToConfirm",
        )?,
        subscribed: opt_bool(sub, "subscribed", "enrollment.subscribed")?,
        overbooking: opt_bool(sub, "overbooking", "enrollment.overbooking")?,
        enrollment_types,
    })
}

/// Query-builder condition values keyed by placeholder name.
fn parse_conditions(
    map: &Map<String, Value>,
) -> Result<Option<BTreeMap<String, ConditionValue>>, ReportError> {
    let Some(sub) = opt_object(map, "conditions", "conditions")? else {
        return Ok(None);
    };
    let mut out = BTreeMap::new();
    for (name, value) in sub {
        let entry =
            value.as_object().ok_or_else(|| ReportError::invalid(format!("conditions.{name}")))?;
        let filter_type = match entry.get("type") {
            None => None,
            Some(Value::String(raw)) => Some(
                FilterType::parse(raw)
                    .ok_or_else(|| ReportError::invalid(format!("conditions.{name}.type")))?,
            ),
            Some(_) => return Err(ReportError::invalid(format!("conditions.{name}.type"))),
        };
        let condition = ConditionValue {
            any: opt_bool(entry, "any", &format!("conditions.{name}.any"))?.unwrap_or(true),
            operator: opt_string(entry, "operator", &format!("conditions.{name}.operator"))?
                .unwrap_or_default(),
            filter_type,
            value: entry.get("value").cloned(),
        };
        out.insert(name.clone(), condition);
    }
    Ok(Some(out))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
