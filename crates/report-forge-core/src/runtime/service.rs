// crates/report-forge-core/src/runtime/service.rs
// ============================================================================
// Module: Report Service
// Description: Load, update, and persist orchestration around the entity.
// Purpose: Tie the document store and clock to the update protocol with
//          best-effort revert on persistence failure.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`ReportService`] is the host-facing surface for configuration changes:
//! load the document (absent or soft-deleted reads as not found), run the
//! entity update, save the result. When the save fails after a successful
//! in-memory update, the service writes the pre-update snapshot back
//! best-effort before surfacing the store error, so retries start from a
//! consistent document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::ReportKey;
use crate::core::info::ReportInfo;
use crate::core::types::UserLevel;
use crate::interfaces::Clock;
use crate::interfaces::ReportStore;
use crate::interfaces::StoreError;
use crate::runtime::error::ReportError;
use crate::runtime::report::Report;
use crate::runtime::report::UpdateContext;

// ============================================================================
// SECTION: Service Errors
// ============================================================================

/// Failures of the service surface.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Validation or lookup failure from the update protocol.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Update Request
// ============================================================================

/// One update request as received from the host.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Host serving the request.
    pub hostname: String,
    /// Tenant subfolder.
    pub subfolder: String,
    /// Id of the editing user.
    pub user_id: u64,
    /// Role of the editing user.
    pub user_level: UserLevel,
    /// Tenant runs on the v2 data lake.
    pub datalake_v2: bool,
    /// Download-permission-link feature toggle.
    pub download_link_enabled: bool,
    /// Patch or full replace.
    pub is_patch: bool,
    /// Update body.
    pub data: Value,
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Report configuration service over a store and a clock.
#[derive(Debug, Clone)]
pub struct ReportService<S, C> {
    /// Document store.
    store: S,
    /// Time source for audit stamps.
    clock: C,
}

impl<S, C> ReportService<S, C>
where
    S: ReportStore,
    C: Clock,
{
    /// Creates a service over the given collaborators.
    #[must_use]
    pub const fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
        }
    }

    /// Loads one report; absent and soft-deleted documents read as not found.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Report`] with [`ReportError::NotFound`] when
    /// the document is absent or deleted, or [`ServiceError::Store`] on
    /// persistence failure.
    pub fn get_report(&self, key: &ReportKey) -> Result<ReportInfo, ServiceError> {
        let info = self.store.load(key)?;
        match info {
            Some(info) if !info.deleted => Ok(info),
            _ => Err(ServiceError::Report(ReportError::NotFound {
                key: key.to_string(),
            })),
        }
    }

    /// Updates one report end to end: load, apply, persist.
    ///
    /// Returns the committed document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Report`] on validation failure (nothing is
    /// written) or [`ServiceError::Store`] when the save fails; in the
    /// latter case the pre-update snapshot is written back best-effort
    /// before the error surfaces.
    pub fn update_report(
        &self,
        key: &ReportKey,
        request: &UpdateRequest,
    ) -> Result<ReportInfo, ServiceError> {
        let current = self.get_report(key)?;
        let snapshot = current.clone();
        let mut report = Report::new(current);
        let ctx = UpdateContext {
            hostname: request.hostname.clone(),
            subfolder: request.subfolder.clone(),
            user_id: request.user_id,
            user_level: request.user_level,
            datalake_v2: request.datalake_v2,
            download_link_enabled: request.download_link_enabled,
            edited_at: self.clock.now(),
        };
        report.update(&ctx, request.is_patch, &request.data)?;
        let updated = report.into_info();
        if let Err(save_error) = self.store.save(key, &updated) {
            // Revert is best-effort; a second failure leaves the store
            // inconsistent and the original error still surfaces.
            let _ = self.store.save(key, &snapshot);
            return Err(ServiceError::Store(save_error));
        }
        Ok(updated)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
