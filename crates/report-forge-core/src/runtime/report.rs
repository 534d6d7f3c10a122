// crates/report-forge-core/src/runtime/report.rs
// ============================================================================
// Module: Report Entity
// Description: Report aggregate and its atomic update protocol.
// Purpose: Orchestrate validate, merge, re-validate, and commit so callers
//          never observe a partially updated document.
// Dependencies: serde_json, time
// ============================================================================

//! ## Overview
//! A [`Report`] owns its configuration document between load and persist.
//! [`Report::update`] is the only mutation path: it validates the incoming
//! payload, produces a candidate document (patch merge or full replace with
//! immutable fields restored), runs the post-merge checks against the
//! candidate, stamps the audit fields, and commits by a single assignment.
//! Any failure leaves the current document byte-identical to its pre-call
//! state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use time::OffsetDateTime;

use crate::core::identifiers::ReportKey;
use crate::core::info::LastEditBy;
use crate::core::info::ReportInfo;
use crate::core::time::format_stamp;
use crate::core::types::UserLevel;
use crate::runtime::checks::run_post_merge_checks;
use crate::runtime::error::ReportError;
use crate::runtime::merge::merge_patch;
use crate::runtime::validator::IMMUTABLE_FIELDS;
use crate::runtime::validator::validate_update;

// ============================================================================
// SECTION: Update Context
// ============================================================================

/// Caller context for one update.
#[derive(Debug, Clone)]
pub struct UpdateContext {
    /// Host serving the request, stamped into active schedules.
    pub hostname: String,
    /// Tenant subfolder, stamped into active schedules.
    pub subfolder: String,
    /// Id of the editing user.
    pub user_id: u64,
    /// Role of the editing user.
    pub user_level: UserLevel,
    /// Tenant runs on the v2 data lake.
    pub datalake_v2: bool,
    /// Download-permission-link feature toggle.
    pub download_link_enabled: bool,
    /// Instant of the edit, supplied by the host's clock.
    pub edited_at: OffsetDateTime,
}

// ============================================================================
// SECTION: Report Entity
// ============================================================================

/// Report aggregate: immutable key plus mutable configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Document-store key.
    key: ReportKey,
    /// Configuration document.
    info: ReportInfo,
}

impl Report {
    /// Wraps a loaded document into its aggregate.
    #[must_use]
    pub fn new(info: ReportInfo) -> Self {
        Self {
            key: info.key(),
            info,
        }
    }

    /// Returns the report key.
    #[must_use]
    pub const fn key(&self) -> &ReportKey {
        &self.key
    }

    /// Returns the current document.
    #[must_use]
    pub const fn info(&self) -> &ReportInfo {
        &self.info
    }

    /// Consumes the aggregate, returning its document.
    #[must_use]
    pub fn into_info(self) -> ReportInfo {
        self.info
    }

    /// Applies one update, as a patch or a full replace.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReportError`] violation; on any error the current
    /// document is unchanged.
    pub fn update(
        &mut self,
        ctx: &UpdateContext,
        is_patch: bool,
        data: &Value,
    ) -> Result<(), ReportError> {
        let patch = validate_update(
            &self.info,
            ctx.user_level,
            ctx.download_link_enabled,
            is_patch,
            data,
        )?;
        let mut candidate = match patch {
            Some(patch) => {
                let mut merged = self.info.clone();
                merge_patch(&mut merged, &patch);
                merged
            }
            None => self.replacement_document(data)?,
        };
        run_post_merge_checks(&candidate, ctx.datalake_v2)?;
        candidate.last_edit = format_stamp(ctx.edited_at);
        candidate.last_edit_by = LastEditBy {
            id_user: Some(ctx.user_id),
            ..LastEditBy::default()
        };
        if candidate.planning.active {
            candidate.planning.option.hostname = Some(ctx.hostname.clone());
            candidate.planning.option.subfolder = Some(ctx.subfolder.clone());
        }
        self.info = candidate;
        Ok(())
    }

    /// Full-replace candidate: the incoming body wholesale, with every
    /// immutable field silently restored from the current document.
    fn replacement_document(&self, data: &Value) -> Result<ReportInfo, ReportError> {
        let mut body = data.clone();
        let map = body.as_object_mut().ok_or_else(ReportError::generic)?;
        let snapshot = serde_json::to_value(&self.info).map_err(|_| ReportError::generic())?;
        for name in IMMUTABLE_FIELDS {
            match snapshot.get(name) {
                Some(value) => {
                    map.insert(name.to_string(), value.clone());
                }
                None => {
                    map.remove(name);
                }
            }
        }
        serde_json::from_value(body).map_err(|_| ReportError::generic())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::Report;
    use super::UpdateContext;
    use crate::core::identifiers::Platform;
    use crate::core::identifiers::ReportId;
    use crate::core::identifiers::ReportKey;
    use crate::core::info::ReportInfo;
    use crate::core::types::ReportKind;
    use crate::core::types::UserLevel;
    use crate::runtime::error::ReportError;

    /// Context fixture for entity tests.
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

    /// Entity fixture for entity tests.
    fn report() -> Result<Report, Box<dyn std::error::Error>> {
        let key = ReportKey::new(
            ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")?,
            Platform::parse("hydra.example.com")?,
        );
        let mut info = ReportInfo::new(
            ReportKind::UsersCourses,
            &key,
            1042,
            "Quarterly completions",
            datetime!(2024-03-05 12:00:00 UTC),
        );
        info.fields = vec!["user.username".into(), "course.name".into()];
        Ok(Report::new(info))
    }

    #[test]
    fn successful_patch_stamps_audit_fields() -> Result<(), Box<dyn std::error::Error>> {
        let mut report = report()?;
        report.update(&ctx(), true, &json!({ "title": "Renamed" }))?;
        assert_eq!(report.info().title, "Renamed");
        assert_eq!(report.info().last_edit, "2024-04-01 09:00:00");
        assert_eq!(report.info().last_edit_by.id_user, Some(2001));
        assert_eq!(report.info().last_edit_by.firstname, None);
        Ok(())
    }

    #[test]
    fn failed_check_leaves_the_document_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let mut report = report()?;
        let before = report.info().clone();
        let result = report.update(
            &ctx(),
            true,
            &json!({ "title": "Renamed", "users": { "all": false } }),
        );
        assert_eq!(result, Err(ReportError::invalid("users.all")));
        assert_eq!(report.info(), &before);
        Ok(())
    }

    #[test]
    fn active_planning_gets_host_context_stamped() -> Result<(), Box<dyn std::error::Error>> {
        let mut report = report()?;
        report.update(
            &ctx(),
            true,
            &json!({
                "planning": {
                    "active": true,
                    "option": { "recipients": ["ops@example.com"] }
                }
            }),
        )?;
        assert_eq!(report.info().planning.option.hostname.as_deref(), Some("reports.example.com"));
        assert_eq!(report.info().planning.option.subfolder.as_deref(), Some("acme"));
        Ok(())
    }

    #[test]
    fn full_replace_restores_immutable_fields() -> Result<(), Box<dyn std::error::Error>> {
        let mut report = report()?;
        let mut body = serde_json::to_value(report.info())?;
        if let Some(map) = body.as_object_mut() {
            map.insert("title".into(), json!("Replaced"));
            map.insert("author".into(), json!(9999));
            map.insert("standard".into(), json!(true));
        }
        report.update(&ctx(), false, &body)?;
        assert_eq!(report.info().title, "Replaced");
        assert_eq!(report.info().author, 1042);
        assert!(!report.info().standard);
        Ok(())
    }
}
