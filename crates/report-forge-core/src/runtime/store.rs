// crates/report-forge-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Report Store
// Description: Mutex-guarded map implementation of the document store.
// Purpose: Back tests and single-process hosts without a durable backend.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`InMemoryReportStore`] keeps documents in a `BTreeMap` keyed by the
//! display form of the report key. Clones share the same underlying map.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::identifiers::ReportKey;
use crate::core::info::ReportInfo;
use crate::interfaces::ReportStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Store
// ============================================================================

/// In-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportStore {
    /// Documents keyed by `platform/report_id`.
    reports: Arc<Mutex<BTreeMap<String, ReportInfo>>>,
}

impl InMemoryReportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        let reports =
            self.reports.lock().map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        Ok(reports.len())
    }

    /// True when no documents are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl ReportStore for InMemoryReportStore {
    fn load(&self, key: &ReportKey) -> Result<Option<ReportInfo>, StoreError> {
        let reports =
            self.reports.lock().map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        Ok(reports.get(&key.to_string()).cloned())
    }

    fn save(&self, key: &ReportKey, info: &ReportInfo) -> Result<(), StoreError> {
        let mut reports =
            self.reports.lock().map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        reports.insert(key.to_string(), info.clone());
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::InMemoryReportStore;
    use crate::core::identifiers::Platform;
    use crate::core::identifiers::ReportId;
    use crate::core::identifiers::ReportKey;
    use crate::core::info::ReportInfo;
    use crate::core::types::ReportKind;
    use crate::interfaces::ReportStore;

    #[test]
    fn save_then_load_round_trips() -> Result<(), Box<dyn std::error::Error>> {
        let store = InMemoryReportStore::new();
        let key = ReportKey::new(
            ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")?,
            Platform::parse("hydra.example.com")?,
        );
        let info = ReportInfo::new(
            ReportKind::Users,
            &key,
            7,
            "All users",
            datetime!(2024-01-01 00:00:00 UTC),
        );
        assert!(store.load(&key)?.is_none());
        store.save(&key, &info)?;
        assert_eq!(store.load(&key)?, Some(info));
        assert_eq!(store.len()?, 1);
        Ok(())
    }

    #[test]
    fn clones_share_the_same_map() -> Result<(), Box<dyn std::error::Error>> {
        let store = InMemoryReportStore::new();
        let clone = store.clone();
        let key = ReportKey::new(
            ReportId::parse("3f2b8c9a-1d2e-4f5a-9b6c-7d8e9f0a1b2c")?,
            Platform::parse("hydra.example.com")?,
        );
        let info = ReportInfo::new(
            ReportKind::Users,
            &key,
            7,
            "All users",
            datetime!(2024-01-01 00:00:00 UTC),
        );
        clone.save(&key, &info)?;
        assert!(store.load(&key)?.is_some());
        Ok(())
    }
}
