// crates/query-filter/src/error.rs
// ============================================================================
// Module: Query Filter Errors
// Description: Typed validation failures for query templates and filter maps.
// Purpose: Surface stable numeric error codes for programmatic API handling.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every validation failure in this crate is a typed, non-retryable,
//! client-caused error carrying a stable numeric code. API surfaces return the
//! code verbatim so clients can branch messaging without parsing strings.
//! Codes are frozen; new variants must claim new numbers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Taxonomy
// ============================================================================

/// Validation failures raised while resolving a query template.
///
/// # Invariants
/// - Variants and their numeric codes are stable for programmatic handling.
/// - The first violation found aborts the whole operation; errors never
///   accumulate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryFilterError {
    /// SQL is empty, malformed, or matches a forbidden statement shape.
    #[error("sql syntax rejected")]
    WrongSql,
    /// Filter definition payload is not valid JSON.
    #[error("filter json does not parse")]
    WrongJson,
    /// SQL contains placeholders but no filter definitions were supplied.
    #[error("sql has placeholders but the json area is empty")]
    JsonAreaEmpty,
    /// Filter definitions were supplied but the SQL has no placeholders.
    #[error("json area is filled but the sql has no placeholders")]
    JsonAreaFilled,
    /// Filter map defines more keys than the SQL has placeholder matches.
    #[error("more filters in json than placeholders in sql")]
    MoreFilterInJson,
    /// A placeholder has no corresponding key in the filter map.
    #[error("placeholder {{{name}}} not found in json filters")]
    FilterNotFoundInJson {
        /// Placeholder name missing from the filter map.
        name: String,
    },
    /// A filter descriptor is missing its target `field`.
    #[error("filter '{name}' is missing the field property")]
    MissingFieldInJsonFilter {
        /// Filter key with the malformed descriptor.
        name: String,
    },
    /// A filter descriptor is missing its `type`.
    #[error("filter '{name}' is missing the type property")]
    MissingTypeInJsonFilter {
        /// Filter key with the malformed descriptor.
        name: String,
    },
    /// A filter descriptor declares an unrecognized `type`.
    #[error("filter '{name}' has an unrecognized type")]
    WrongTypeInJsonFilter {
        /// Filter key with the malformed descriptor.
        name: String,
    },
    /// A date/text filter descriptor is missing its `description`.
    #[error("filter '{name}' is missing the description property")]
    MissingDescriptionInJsonFilter {
        /// Filter key with the malformed descriptor.
        name: String,
    },
}

impl QueryFilterError {
    /// Returns the stable numeric code for the error.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::WrongSql => 15,
            Self::WrongJson => 16,
            Self::JsonAreaEmpty => 17,
            Self::JsonAreaFilled => 18,
            Self::MoreFilterInJson => 19,
            Self::FilterNotFoundInJson { .. } => 20,
            Self::MissingFieldInJsonFilter { .. } => 21,
            Self::MissingTypeInJsonFilter { .. } => 22,
            Self::WrongTypeInJsonFilter { .. } => 23,
            Self::MissingDescriptionInJsonFilter { .. } => 24,
        }
    }
}
