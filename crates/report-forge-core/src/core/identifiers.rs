// crates/report-forge-core/src/core/identifiers.rs
// ============================================================================
// Module: Report Forge Identifiers
// Description: Canonical identifiers for reports and tenant platforms.
// Purpose: Provide strongly typed, serializable identifiers validated at
//          construction boundaries.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the identifiers used throughout Report Forge. A report
//! is addressed by the pair of a UUID-v4-shaped report identifier and a
//! non-empty platform name; the pair acts as the document-store primary key
//! and is immutable for the lifetime of the report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identifier construction failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Report identifier is not UUID-v4 shaped.
    #[error("report id is not a v4 uuid: {raw}")]
    MalformedReportId {
        /// Rejected raw value.
        raw: String,
    },
    /// Platform name is empty or whitespace-only.
    #[error("platform name is empty")]
    EmptyPlatform,
}

// ============================================================================
// SECTION: Report Identifier
// ============================================================================

/// Report identifier in canonical UUID-v4 text form.
///
/// # Invariants
/// - Always `8-4-4-4-12` hex groups with version nibble `4` and variant
///   `8`, `9`, `a`, or `b`; validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Parses and validates a report identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::MalformedReportId`] when the value is not
    /// UUID-v4 shaped.
    pub fn parse(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        if is_uuid_v4_shaped(&raw) {
            Ok(Self(raw))
        } else {
            Err(IdentifierError::MalformedReportId {
                raw,
            })
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Checks the `8-4-4-4-12` UUID-v4 text shape.
fn is_uuid_v4_shaped(raw: &str) -> bool {
    let groups: Vec<&str> = raw.split('-').collect();
    let lengths = [8usize, 4, 4, 4, 12];
    if groups.len() != lengths.len() {
        return false;
    }
    for (group, expected) in groups.iter().zip(lengths) {
        if group.len() != expected || !group.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }
    }
    let version = groups[2].chars().next();
    let variant = groups[3].chars().next();
    version == Some('4') && variant.is_some_and(|c| matches!(c, '8' | '9' | 'a' | 'b' | 'A' | 'B'))
}

// ============================================================================
// SECTION: Platform
// ============================================================================

/// Tenant platform name scoping a report.
///
/// # Invariants
/// - Never empty or whitespace-only; validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

impl Platform {
    /// Parses and validates a platform name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::EmptyPlatform`] when the value is empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(IdentifierError::EmptyPlatform)
        } else {
            Ok(Self(raw))
        }
    }

    /// Returns the platform name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Report Key
// ============================================================================

/// Immutable document-store primary key for one report.
///
/// # Invariants
/// - Both components are validated at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportKey {
    /// Report identifier.
    pub report_id: ReportId,
    /// Tenant platform name.
    pub platform: Platform,
}

impl ReportKey {
    /// Creates a report key from validated components.
    #[must_use]
    pub const fn new(report_id: ReportId, platform: Platform) -> Self {
        Self {
            report_id,
            platform,
        }
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.report_id)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
