// crates/report-forge-core/src/runtime/merge.rs
// ============================================================================
// Module: Patch Merger
// Description: Whitelist-driven deep merge of a typed patch into a document.
// Purpose: Apply only the fields a patch sets, field-by-field, lazily
//          initializing absent sub-documents.
// Dependencies: none beyond the core model
// ============================================================================

//! ## Overview
//! [`merge_patch`] applies a validated [`ReportPatch`] to a [`ReportInfo`].
//! Every family merges field-level, never by whole-object replacement, so a
//! patch can flip one flag without clearing its siblings. Sub-documents the
//! patch touches for the first time are initialized to their defaults before
//! the patched fields land.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::info::DateOptionsFilter;
use crate::core::info::ReportInfo;
use crate::runtime::patch::DateFilterPatch;
use crate::runtime::patch::ReportPatch;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Merges a validated patch into the document, field by field.
#[allow(clippy::too_many_lines, reason = "one merge arm per whitelisted family")]
pub fn merge_patch(info: &mut ReportInfo, patch: &ReportPatch) {
    if let Some(login_required) = patch.login_required {
        info.login_required = login_required;
    }
    if let Some(description) = &patch.description {
        info.description = description.clone();
    }
    if let Some(title) = &patch.title {
        info.title = title.clone();
    }
    if let Some(timezone) = &patch.timezone {
        info.timezone = timezone.clone();
    }
    if let Some(fields) = &patch.fields {
        info.fields = fields.clone();
    }
    if let Some(conditions) = &patch.conditions {
        info.conditions = Some(conditions.clone());
    }
    if let Some(filter) = &patch.user_additional_fields_filter {
        info.user_additional_fields_filter = Some(filter.clone());
    }
    if let Some(lo_types) = &patch.lo_types {
        info.lo_types = Some(lo_types.clone());
    }

    if let Some(sorting) = &patch.sorting_options {
        let target = info.sorting_options.get_or_insert_with(Default::default);
        if let Some(selector) = &sorting.selector {
            target.selector = selector.clone();
        }
        if let Some(selected_field) = &sorting.selected_field {
            target.selected_field = selected_field.clone();
        }
        if let Some(order_by) = &sorting.order_by {
            target.order_by = order_by.clone();
        }
    }

    if let Some(visibility) = &patch.visibility {
        let target = info.visibility.get_or_insert_with(Default::default);
        if let Some(rule) = visibility.rule {
            target.rule = rule;
        }
        if let Some(users) = &visibility.users {
            target.users = users.clone();
        }
        if let Some(groups) = &visibility.groups {
            target.groups = groups.clone();
        }
        if let Some(branches) = &visibility.branches {
            target.branches = branches.clone();
        }
    }

    if let Some(planning) = &patch.planning {
        if let Some(active) = planning.active {
            info.planning.active = active;
        }
        if let Some(option) = &planning.option {
            let target = &mut info.planning.option;
            if let Some(every) = option.every {
                target.every = Some(every);
            }
            if let Some(time_frame) = &option.time_frame {
                target.time_frame = Some(time_frame.clone());
            }
            if let Some(recipients) = &option.recipients {
                target.recipients = recipients.clone();
            }
            if let Some(schedule_from) = &option.schedule_from {
                target.schedule_from = Some(schedule_from.clone());
            }
            if let Some(start_hour) = &option.start_hour {
                target.start_hour = Some(start_hour.clone());
            }
            if let Some(timezone) = &option.timezone {
                target.timezone = Some(timezone.clone());
            }
        }
    }

    if let Some(users) = &patch.users {
        let target = info.users.get_or_insert_with(Default::default);
        if let Some(all) = users.all {
            target.all = all;
        }
        if let Some(hide_deactivated) = users.hide_deactivated {
            target.hide_deactivated = hide_deactivated;
        }
        if let Some(show_only_learners) = users.show_only_learners {
            target.show_only_learners = show_only_learners;
        }
        if let Some(hide_expired_users) = users.hide_expired_users {
            target.hide_expired_users = hide_expired_users;
        }
        if let Some(is_user_add_fields) = users.is_user_add_fields {
            target.is_user_add_fields = is_user_add_fields;
        }
        if let Some(list) = &users.users {
            target.users = list.clone();
        }
        if let Some(groups) = &users.groups {
            target.groups = groups.clone();
        }
        if let Some(branches) = &users.branches {
            target.branches = branches.clone();
        }
    }

    if let Some(courses) = &patch.courses {
        let target = info.courses.get_or_insert_with(Default::default);
        if let Some(all) = courses.all {
            target.all = all;
        }
        if let Some(list) = &courses.courses {
            target.courses = list.clone();
        }
        if let Some(learning_plans) = &courses.learning_plans {
            target.learning_plans = learning_plans.clone();
        }
    }

    for (slot, family) in [
        (&mut info.surveys, &patch.surveys),
        (&mut info.learning_plans, &patch.learning_plans),
        (&mut info.badges, &patch.badges),
        (&mut info.sessions, &patch.sessions),
        (&mut info.instructors, &patch.instructors),
    ] {
        if let Some(family) = family {
            let target = slot.get_or_insert_with(Default::default);
            if let Some(all) = family.all {
                target.all = all;
            }
            if let Some(entities) = &family.entities {
                target.entities = entities.clone();
            }
        }
    }

    if let Some(assets) = &patch.assets {
        let target = info.assets.get_or_insert_with(Default::default);
        if let Some(all) = assets.all {
            target.all = all;
        }
        if let Some(list) = &assets.assets {
            target.assets = list.clone();
        }
        if let Some(channels) = &assets.channels {
            target.channels = channels.clone();
        }
    }

    if let Some(certifications) = &patch.certifications {
        let target = info.certifications.get_or_insert_with(Default::default);
        if let Some(all) = certifications.all {
            target.all = all;
        }
        if let Some(active) = certifications.active_certifications {
            target.active_certifications = active;
        }
        if let Some(expired) = certifications.expired_certifications {
            target.expired_certifications = expired;
        }
        if let Some(archived) = certifications.archived_certifications {
            target.archived_certifications = archived;
        }
        if let Some(list) = &certifications.certifications {
            target.certifications = list.clone();
        }
        if let Some(date) = &certifications.certification_date {
            merge_date_filter(&mut target.certification_date, date);
        }
        if let Some(date) = &certifications.certification_expiration_date {
            merge_date_filter(&mut target.certification_expiration_date, date);
        }
    }

    if let Some(session_dates) = &patch.session_dates {
        let target = info.session_dates.get_or_insert_with(Default::default);
        if let Some(date) = &session_dates.start_date {
            merge_date_filter(&mut target.start_date, date);
        }
        if let Some(date) = &session_dates.end_date {
            merge_date_filter(&mut target.end_date, date);
        }
    }

    if let Some(enrollment) = &patch.enrollment {
        let target = info.enrollment.get_or_insert_with(Default::default);
        if let Some(completed) = enrollment.completed {
            target.completed = completed;
        }
        if let Some(in_progress) = enrollment.in_progress {
            target.in_progress = in_progress;
        }
        if let Some(not_started) = enrollment.not_started {
            target.not_started = not_started;
        }
        if let Some(waiting_list) = enrollment.waiting_list {
            target.waiting_list = waiting_list;
        }
        if let Some(suspended) = enrollment.suspended {
            target.suspended = suspended;
        }
        if let Some(to_confirm) = enrollment.enrollments_to_confirm {
            target.enrollments_to_confirm = to_confirm;
        }
        if let Some(subscribed) = enrollment.subscribed {
            target.subscribed = subscribed;
        }
        if let Some(overbooking) = enrollment.overbooking {
            target.overbooking = overbooking;
        }
        if let Some(enrollment_types) = enrollment.enrollment_types {
            target.enrollment_types = enrollment_types;
        }
    }

    if let Some(status) = &patch.external_training_status_filter {
        let target = info.external_training_status_filter.get_or_insert_with(Default::default);
        if let Some(approved) = status.approved {
            target.approved = approved;
        }
        if let Some(waiting) = status.waiting {
            target.waiting = waiting;
        }
        if let Some(rejected) = status.rejected {
            target.rejected = rejected;
        }
    }

    if let Some(publish) = &patch.publish_status {
        let target = info.publish_status.get_or_insert_with(Default::default);
        if let Some(published) = publish.published {
            target.published = published;
        }
        if let Some(unpublished) = publish.unpublished {
            target.unpublished = unpublished;
        }
    }

    if let Some(attendance) = &patch.session_attendance_type {
        let target = info.session_attendance_type.get_or_insert_with(Default::default);
        if let Some(blended) = attendance.blended {
            target.blended = blended;
        }
        if let Some(flexible) = attendance.flexible {
            target.flexible = flexible;
        }
        if let Some(full_online) = attendance.full_online {
            target.full_online = full_online;
        }
        if let Some(full_onsite) = attendance.full_onsite {
            target.full_onsite = full_onsite;
        }
    }

    for (name, date_patch) in &patch.date_filters {
        if let Some(slot) = info.date_filter_mut(name) {
            let target = slot.get_or_insert_with(Default::default);
            merge_date_filter_inner(target, date_patch);
        }
    }
}

// ============================================================================
// SECTION: Date Filter Merge
// ============================================================================

/// Field-level merge into a non-optional date filter.
fn merge_date_filter(target: &mut DateOptionsFilter, patch: &DateFilterPatch) {
    merge_date_filter_inner(target, patch);
}

/// Shared date-filter field merge.
fn merge_date_filter_inner(target: &mut DateOptionsFilter, patch: &DateFilterPatch) {
    if let Some(any) = patch.any {
        target.any = any;
    }
    if let Some(operator) = &patch.operator {
        target.operator = operator.clone();
    }
    if let Some(kind) = &patch.kind {
        target.kind = kind.clone();
    }
    if let Some(from) = &patch.from {
        target.from = from.clone();
    }
    if let Some(to) = &patch.to {
        target.to = to.clone();
    }
    if let Some(days) = patch.days {
        target.days = days;
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::merge_patch;
    use crate::core::identifiers::Platform;
    use crate::core::identifiers::ReportId;
    use crate::core::identifiers::ReportKey;
    use crate::core::info::ReportInfo;
    use crate::core::types::ReportKind;
    use crate::runtime::patch::DateFilterPatch;
    use crate::runtime::patch::ReportPatch;
    use crate::runtime::patch::UsersFilterPatch;

    /// Document fixture for merge tests.
    fn report() -> Result<ReportInfo, Box<dyn std::error::Error>> {
        let key = ReportKey::new(
            ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")?,
            Platform::parse("hydra.example.com")?,
        );
        Ok(ReportInfo::new(
            ReportKind::UsersCourses,
            &key,
            1042,
            "Quarterly completions",
            datetime!(2024-03-05 12:00:00 UTC),
        ))
    }

    #[test]
    fn single_flag_merge_keeps_siblings() -> Result<(), Box<dyn std::error::Error>> {
        let mut info = report()?;
        let patch = ReportPatch {
            users: Some(UsersFilterPatch {
                hide_deactivated: Some(false),
                ..UsersFilterPatch::default()
            }),
            ..ReportPatch::default()
        };
        merge_patch(&mut info, &patch);
        let users = info.users.ok_or("users family missing")?;
        assert!(!users.hide_deactivated);
        assert!(users.all);
        Ok(())
    }

    #[test]
    fn date_filter_merge_lazily_defaults_the_sub_document()
    -> Result<(), Box<dyn std::error::Error>> {
        let mut info = report()?;
        assert!(info.enrollment_date.is_none());
        let mut patch = ReportPatch::default();
        patch.date_filters.insert(
            "enrollmentDate".into(),
            DateFilterPatch {
                any: Some(false),
                operator: Some("expiringIn".into()),
                days: Some(30),
                ..DateFilterPatch::default()
            },
        );
        merge_patch(&mut info, &patch);
        let filter = info.enrollment_date.ok_or("date filter missing")?;
        assert!(!filter.any);
        assert_eq!(filter.operator, "expiringIn");
        assert_eq!(filter.days, 30);
        assert_eq!(filter.kind, "");
        Ok(())
    }

    #[test]
    fn planning_option_merge_never_clears_unspecified_fields()
    -> Result<(), Box<dyn std::error::Error>> {
        let mut info = report()?;
        info.planning.option.recipients = vec!["ops@example.com".into()];
        let patch = ReportPatch {
            planning: Some(crate::runtime::patch::PlanningPatch {
                active: Some(true),
                option: Some(crate::runtime::patch::PlanningOptionPatch {
                    start_hour: Some("06:00".into()),
                    ..crate::runtime::patch::PlanningOptionPatch::default()
                }),
            }),
            ..ReportPatch::default()
        };
        merge_patch(&mut info, &patch);
        assert!(info.planning.active);
        assert_eq!(info.planning.option.start_hour.as_deref(), Some("06:00"));
        assert_eq!(info.planning.option.recipients, vec!["ops@example.com".to_string()]);
        Ok(())
    }
}
