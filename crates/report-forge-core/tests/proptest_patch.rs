// crates/report-forge-core/tests/proptest_patch.rs
// ============================================================================
// Module: Patch Property-Based Tests
// Description: Property tests for patch whitelist and commit invariants.
// Purpose: Detect panics and whitelist violations across wide input ranges.
// ============================================================================

//! Property-based tests for the patch validator and merger.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use report_forge_core::Platform;
use report_forge_core::Report;
use report_forge_core::ReportId;
use report_forge_core::ReportInfo;
use report_forge_core::ReportKey;
use report_forge_core::ReportKind;
use report_forge_core::UpdateContext;
use report_forge_core::UserLevel;
use report_forge_core::runtime::validate_update;
use serde_json::Value;
use serde_json::json;
use time::macros::datetime;

/// Valid users-courses document fixture.
fn seeded_report() -> Report {
    let key = ReportKey::new(
        ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c").expect("valid id"),
        Platform::parse("hydra.example.com").expect("valid platform"),
    );
    let mut info = ReportInfo::new(
        ReportKind::UsersCourses,
        &key,
        1042,
        "Quarterly completions",
        datetime!(2024-03-05 12:00:00 UTC),
    );
    info.fields = vec!["user.username".into(), "course.name".into()];
    Report::new(info)
}

/// Fixed update context so merged documents are comparable.
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

/// Arbitrary JSON leaf values.
fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

proptest! {
    #[test]
    fn unknown_fields_never_change_the_merge_result(
        // `zz` prefix keeps generated names out of the whitelist.
        unknown_key in "zz[a-zA-Z]{1,10}",
        unknown_value in leaf_value()
    ) {
        let mut with_unknown = seeded_report();
        let mut stripped = seeded_report();
        with_unknown.update(&ctx(), true, &json!({
            "description": "updated",
            unknown_key.clone(): unknown_value.clone(),
            "users": { "hideDeactivated": false, unknown_key.clone(): unknown_value },
        })).expect("patch applies");
        stripped.update(&ctx(), true, &json!({
            "description": "updated",
            "users": { "hideDeactivated": false },
        })).expect("patch applies");
        prop_assert_eq!(with_unknown.info(), stripped.info());
    }

    #[test]
    fn any_string_title_commits_verbatim(title in "\\PC{1,40}") {
        prop_assume!(!title.trim().is_empty());
        let mut report = seeded_report();
        report.update(&ctx(), true, &json!({ "title": title.clone() }))
            .expect("title patch applies");
        prop_assert_eq!(&report.info().title, &title);
    }

    #[test]
    fn validator_never_panics_on_arbitrary_payloads(
        keys in prop::collection::vec("[a-zA-Z]{1,18}", 0 .. 8),
        values in prop::collection::vec(leaf_value(), 0 .. 8)
    ) {
        let report = seeded_report();
        let mut body = serde_json::Map::new();
        for (key, value) in keys.into_iter().zip(values) {
            body.insert(key, value);
        }
        let _ = validate_update(
            report.info(),
            UserLevel::Godadmin,
            true,
            true,
            &Value::Object(body),
        );
    }

    #[test]
    fn failed_updates_never_leak_partial_state(
        title in "[a-zA-Z ]{1,20}"
    ) {
        let mut report = seeded_report();
        let before = report.info().clone();
        // The narrowed empty family always fails post-merge, whatever the
        // accompanying valid edits were.
        let result = report.update(&ctx(), true, &json!({
            "title": title,
            "courses": { "all": false },
        }));
        prop_assert!(result.is_err());
        prop_assert_eq!(report.info(), &before);
    }
}
