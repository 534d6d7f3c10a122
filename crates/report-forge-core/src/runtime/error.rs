// crates/report-forge-core/src/runtime/error.rs
// ============================================================================
// Module: Report Errors
// Description: Typed report validation and lookup errors with stable codes.
// Purpose: Surface first-violation failures to API callers as stable numeric
//          codes.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every failure of the update protocol is one of four typed errors. Codes
//! are part of the external contract; clients branch UI messaging on them.
//! Validators fail fast: the first violation aborts the operation and no
//! error accumulation happens.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Field path reported when an untyped validation failure is collapsed.
pub const GENERIC_VALIDATION_FIELD: &str = "Generic error on validation";

/// Report validation and lookup failures.
///
/// # Invariants
/// - Numeric codes are stable and surfaced verbatim to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Report absent or soft-deleted.
    #[error("report not found: {key}")]
    NotFound {
        /// Key that missed.
        key: String,
    },
    /// A mandatory field is missing or empty.
    #[error("mandatory field not found: {field}")]
    MandatoryFieldNotFound {
        /// Dotted path of the missing field.
        field: String,
    },
    /// A field carries an invalid value or violates a cross-field invariant.
    #[error("invalid field: {field}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: String,
    },
    /// A patch attempted to change an immutable or forbidden field.
    #[error("field is not editable: {field}")]
    FieldNotEditable {
        /// Dotted path of the protected field.
        field: String,
    },
}

impl ReportError {
    /// Stable numeric code for API clients.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 1001,
            Self::MandatoryFieldNotFound { .. } => 1002,
            Self::InvalidField { .. } => 1003,
            Self::FieldNotEditable { .. } => 1004,
        }
    }

    /// Invalid-field error for a dotted path.
    #[must_use]
    pub fn invalid(field: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
        }
    }

    /// Mandatory-field error for a dotted path.
    #[must_use]
    pub fn mandatory(field: impl Into<String>) -> Self {
        Self::MandatoryFieldNotFound {
            field: field.into(),
        }
    }

    /// Not-editable error for a dotted path.
    #[must_use]
    pub fn not_editable(field: impl Into<String>) -> Self {
        Self::FieldNotEditable {
            field: field.into(),
        }
    }

    /// Collapsed error for untyped validation failures.
    #[must_use]
    pub fn generic() -> Self {
        Self::invalid(GENERIC_VALIDATION_FIELD)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
