// crates/report-forge-core/tests/update_protocol.rs
// ============================================================================
// Module: Update Protocol Integration Tests
// Description: End-to-end scenarios for the report update protocol.
// Purpose: Exercise validate, merge, check, commit, and persistence revert
//          through the public crate surface.
// ============================================================================

//! Integration tests for the report update protocol and service.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use report_forge_core::InMemoryReportStore;
use report_forge_core::Platform;
use report_forge_core::Report;
use report_forge_core::ReportError;
use report_forge_core::ReportId;
use report_forge_core::ReportInfo;
use report_forge_core::ReportKey;
use report_forge_core::ReportKind;
use report_forge_core::ReportService;
use report_forge_core::ReportStore;
use report_forge_core::ServiceError;
use report_forge_core::StoreError;
use report_forge_core::UpdateContext;
use report_forge_core::UpdateRequest;
use report_forge_core::Clock;
use report_forge_core::UserLevel;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use time::macros::datetime;

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
struct FixedClock(OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Store wrapper that fails the next save on demand.
struct FlakyStore {
    inner: InMemoryReportStore,
    fail_next_save: AtomicBool,
}

impl FlakyStore {
    fn new(inner: InMemoryReportStore) -> Self {
        Self {
            inner,
            fail_next_save: AtomicBool::new(false),
        }
    }
}

impl ReportStore for &FlakyStore {
    fn load(&self, key: &ReportKey) -> Result<Option<ReportInfo>, StoreError> {
        self.inner.load(key)
    }

    fn save(&self, key: &ReportKey, info: &ReportInfo) -> Result<(), StoreError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Io("disk full".into()));
        }
        self.inner.save(key, info)
    }
}

/// Key fixture shared by every scenario.
fn key() -> Result<ReportKey, Box<dyn std::error::Error>> {
    Ok(ReportKey::new(
        ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")?,
        Platform::parse("hydra.example.com")?,
    ))
}

/// Valid users-courses document fixture.
fn seeded_info() -> Result<ReportInfo, Box<dyn std::error::Error>> {
    let key = key()?;
    let mut info = ReportInfo::new(
        ReportKind::UsersCourses,
        &key,
        1042,
        "Quarterly completions",
        datetime!(2024-03-05 12:00:00 UTC),
    );
    info.fields = vec!["user.username".into(), "course.name".into()];
    Ok(info)
}

/// Context fixture for entity-level scenarios.
fn ctx() -> UpdateContext {
    UpdateContext {
        hostname: "reports.example.com".into(),
        subfolder: "acme".into(),
        user_id: 2001,
        user_level: UserLevel::Godadmin,
        datalake_v2: false,
        download_link_enabled: true,
        edited_at: datetime!(2024-04-01 09:00:00 UTC),
    }
}

/// Patch request fixture for service-level scenarios.
fn patch_request(data: Value) -> UpdateRequest {
    UpdateRequest {
        hostname: "reports.example.com".into(),
        subfolder: "acme".into(),
        user_id: 2001,
        user_level: UserLevel::Godadmin,
        datalake_v2: false,
        download_link_enabled: true,
        is_patch: true,
        data,
    }
}

#[test]
fn all_or_nothing_on_post_merge_failure() -> Result<(), Box<dyn std::error::Error>> {
    let mut report = Report::new(seeded_info()?);
    let before = report.info().clone();
    // Title change is valid on its own; the empty narrowed family fails the
    // post-merge checks and must drag the title change down with it.
    let result = report.update(
        &ctx(),
        true,
        &json!({ "title": "Renamed", "courses": { "all": false } }),
    );
    assert_eq!(result, Err(ReportError::invalid("courses.all")));
    assert_eq!(report.info(), &before);
    Ok(())
}

#[test]
fn immutable_patch_is_rejected_with_unchanged_snapshot()
-> Result<(), Box<dyn std::error::Error>> {
    let mut report = Report::new(seeded_info()?);
    let before = report.info().clone();
    for (field, value) in [
        ("idReport", json!("9f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")),
        ("platform", json!("other.example.com")),
        ("author", json!(1)),
        ("type", json!("users")),
    ] {
        let result = report.update(&ctx(), true, &json!({ field: value }));
        assert!(result.is_err(), "{field} must be rejected");
        assert_eq!(report.info(), &before, "{field} must not mutate the document");
    }
    Ok(())
}

#[test]
fn activating_planning_without_recipients_names_the_path()
-> Result<(), Box<dyn std::error::Error>> {
    let mut report = Report::new(seeded_info()?);
    let result = report.update(&ctx(), true, &json!({ "planning": { "active": true } }));
    assert_eq!(result, Err(ReportError::mandatory("planning.option.recipients")));
    Ok(())
}

#[test]
fn unknown_patch_fields_are_no_ops() -> Result<(), Box<dyn std::error::Error>> {
    let mut with_unknown = Report::new(seeded_info()?);
    let mut without_unknown = Report::new(seeded_info()?);
    with_unknown.update(
        &ctx(),
        true,
        &json!({
            "description": "updated",
            "users": { "hideDeactivated": false, "futureFlag": true },
            "bogusTopLevel": { "all": false }
        }),
    )?;
    without_unknown.update(
        &ctx(),
        true,
        &json!({
            "description": "updated",
            "users": { "hideDeactivated": false }
        }),
    )?;
    assert_eq!(with_unknown.info(), without_unknown.info());
    Ok(())
}

#[test]
fn nested_date_filter_patch_validates_after_merge() -> Result<(), Box<dyn std::error::Error>> {
    let mut report = Report::new(seeded_info()?);
    report.update(
        &ctx(),
        true,
        &json!({
            "completionDate": {
                "any": false,
                "operator": "range",
                "from": "2024-01-01",
                "to": "2024-03-31"
            }
        }),
    )?;
    let filter = report.info().completion_date.clone().ok_or("filter missing")?;
    assert!(!filter.any);
    // A later patch flipping only the bounds must fail when it inverts them.
    let result = report.update(
        &ctx(),
        true,
        &json!({ "completionDate": { "from": "2024-06-01" } }),
    );
    assert_eq!(result, Err(ReportError::invalid("completionDate.from")));
    Ok(())
}

#[test]
fn save_failure_reverts_to_the_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let inner = InMemoryReportStore::new();
    let key = key()?;
    let seeded = seeded_info()?;
    inner.save(&key, &seeded)?;
    let flaky = FlakyStore::new(inner.clone());
    let service = ReportService::new(&flaky, FixedClock(datetime!(2024-04-01 09:00:00 UTC)));
    flaky.fail_next_save.store(true, Ordering::SeqCst);
    let result = service.update_report(&key, &patch_request(json!({ "title": "Renamed" })));
    assert!(matches!(result, Err(ServiceError::Store(StoreError::Io(_)))));
    assert_eq!(inner.load(&key)?, Some(seeded));
    Ok(())
}

#[test]
fn full_replace_runs_the_same_post_merge_gate() -> Result<(), Box<dyn std::error::Error>> {
    let mut report = Report::new(seeded_info()?);
    let before = report.info().clone();
    let mut body = serde_json::to_value(report.info())?;
    if let Some(map) = body.as_object_mut() {
        map.insert("title".into(), json!(""));
    }
    let result = report.update(&ctx(), false, &body);
    assert_eq!(result, Err(ReportError::mandatory("title")));
    assert_eq!(report.info(), &before);
    Ok(())
}
