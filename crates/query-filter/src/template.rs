// crates/query-filter/src/template.rs
// ============================================================================
// Module: Query Template Engine
// Description: Placeholder extraction, filter cross-validation, substitution.
// Purpose: Resolve `{name}` placeholders against a JSON filter map into
//          runnable SQL with semantically neutral fragments.
// Dependencies: crate::{error, syntax}, regex, serde_json
// ============================================================================

//! ## Overview
//! A query template carries `{name}` placeholders standing in for user-defined
//! filters. Each placeholder must map 1:1 onto a key of the JSON filter
//! definition map (duplicated placeholders count once per occurrence on the
//! SQL side). Substitution rewrites each placeholder into the tautology
//! `(<field> is not null or <field> is null)`, which preserves query shape and
//! cardinality while proving the column reference resolves — the real per-row
//! filtering happens in the execution backend.
//!
//! All functions here are pure; there is no shared mutable state and the
//! engine is safe to run with unbounded concurrency.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::QueryFilterError;
use crate::syntax::check_syntax;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Matches `{...}` placeholders, non-greedy, across the whole template.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
    Regex::new(r"\{(.*?)\}").expect("valid regex")
});

// ============================================================================
// SECTION: Filter Descriptors
// ============================================================================

/// Semantic filter type declared by a filter descriptor.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Filter selects user entities.
    Users,
    /// Filter selects course entities.
    Courses,
    /// Filter selects organization branches.
    Branches,
    /// Filter constrains a date column.
    Date,
    /// Filter constrains a free-text column.
    Text,
}

impl FilterType {
    /// Parses the wire name of a filter type.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "users" => Some(Self::Users),
            "courses" => Some(Self::Courses),
            "branches" => Some(Self::Branches),
            "date" => Some(Self::Date),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Returns the wire name of the filter type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Courses => "courses",
            Self::Branches => "branches",
            Self::Date => "date",
            Self::Text => "text",
        }
    }

    /// Indicates whether the type requires a UI description.
    #[must_use]
    pub const fn requires_description(self) -> bool {
        matches!(self, Self::Date | Self::Text)
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated filter descriptor for one placeholder.
///
/// # Invariants
/// - `field` is non-empty.
/// - `description` is present when [`FilterType::requires_description`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    /// Target column reference, optionally `table.`-prefixed or a function call.
    pub field: String,
    /// Semantic filter type.
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    /// UI description; mandatory for date/text filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Requests case-insensitive matching in the execution backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_insensitive: Option<bool>,
}

/// Validated filter map keyed by placeholder name.
pub type FilterMap = BTreeMap<String, FilterDescriptor>;

// ============================================================================
// SECTION: Placeholder Extraction
// ============================================================================

/// Extracts `{...}` placeholder names from a SQL template in match order.
///
/// Duplicated placeholders appear once per occurrence.
#[must_use]
pub fn extract_placeholders(sql: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(sql)
        .filter_map(|capture| capture.get(1).map(|name| name.as_str().to_string()))
        .collect()
}

// ============================================================================
// SECTION: Filter Map Validation
// ============================================================================

/// Cross-checks the JSON area against the extracted placeholder count.
fn validate_json_area(match_count: usize, json: Option<&str>) -> Result<(), QueryFilterError> {
    let filled = json.is_some_and(|raw| !raw.trim().is_empty());
    if filled {
        let raw = json.unwrap_or_default();
        let parsed: Value =
            serde_json::from_str(raw).map_err(|_| QueryFilterError::WrongJson)?;
        if !parsed.is_object() {
            return Err(QueryFilterError::WrongJson);
        }
    }
    if match_count > 0 && !filled {
        return Err(QueryFilterError::JsonAreaEmpty);
    }
    if match_count == 0 && filled {
        return Err(QueryFilterError::JsonAreaFilled);
    }
    Ok(())
}

/// Parses and validates the filter map against the placeholder list.
///
/// # Errors
///
/// Returns [`QueryFilterError`] for parse failures, key/placeholder
/// mismatches, and malformed descriptors. The first violation aborts.
pub fn validate_filter_map(
    placeholders: &[String],
    json: &str,
) -> Result<FilterMap, QueryFilterError> {
    let parsed: Value = serde_json::from_str(json).map_err(|_| QueryFilterError::WrongJson)?;
    let Value::Object(entries) = parsed else {
        return Err(QueryFilterError::WrongJson);
    };
    if entries.len() > placeholders.len() {
        return Err(QueryFilterError::MoreFilterInJson);
    }
    for name in placeholders {
        if !entries.contains_key(name) {
            return Err(QueryFilterError::FilterNotFoundInJson {
                name: name.clone(),
            });
        }
    }

    let mut validated = FilterMap::new();
    for (name, descriptor) in &entries {
        validated.insert(name.clone(), validate_descriptor(name, descriptor)?);
    }
    Ok(validated)
}

/// Validates one filter descriptor entry.
fn validate_descriptor(
    name: &str,
    descriptor: &Value,
) -> Result<FilterDescriptor, QueryFilterError> {
    let field = descriptor
        .get("field")
        .and_then(Value::as_str)
        .filter(|field| !field.trim().is_empty())
        .ok_or_else(|| QueryFilterError::MissingFieldInJsonFilter {
            name: name.to_string(),
        })?;
    let raw_type = descriptor.get("type").and_then(Value::as_str).ok_or_else(|| {
        QueryFilterError::MissingTypeInJsonFilter {
            name: name.to_string(),
        }
    })?;
    let filter_type =
        FilterType::parse(raw_type).ok_or_else(|| QueryFilterError::WrongTypeInJsonFilter {
            name: name.to_string(),
        })?;
    let description = descriptor
        .get("description")
        .and_then(Value::as_str)
        .filter(|description| !description.trim().is_empty())
        .map(ToString::to_string);
    if filter_type.requires_description() && description.is_none() {
        return Err(QueryFilterError::MissingDescriptionInJsonFilter {
            name: name.to_string(),
        });
    }
    let case_insensitive = descriptor.get("caseInsensitive").and_then(Value::as_bool);
    Ok(FilterDescriptor {
        field: field.to_string(),
        filter_type,
        description,
        case_insensitive,
    })
}

// ============================================================================
// SECTION: Substitution
// ============================================================================

/// Rewrites a column reference for the datalake v3 dialect.
///
/// Function calls (anything ending in `)`) pass through untouched. A bare or
/// `table.`-prefixed column is lowercased and double-quoted unless it is
/// already quoted.
#[must_use]
pub fn convert_to_datalake_v3(field: &str) -> String {
    if field.ends_with(')') {
        return field.to_string();
    }
    let (prefix, column) = match field.split_once('.') {
        Some((table, column)) => (Some(table), column),
        None => (None, field),
    };
    let quoted = if column.starts_with('"') && column.ends_with('"') && column.len() >= 2 {
        column.to_string()
    } else {
        format!("\"{}\"", column.to_lowercase())
    };
    prefix.map_or(quoted.clone(), |table| format!("{table}.{quoted}"))
}

/// Substitutes every placeholder with its neutral null-check fragment.
///
/// The output is a pure function of the inputs: substituting twice with the
/// same arguments yields the same string.
#[must_use]
pub fn substitute(
    datalake_v3: bool,
    placeholders: &[String],
    filters: &FilterMap,
    sql: &str,
) -> String {
    let mut output = sql.to_string();
    for name in placeholders {
        let Some(descriptor) = filters.get(name) else {
            continue;
        };
        let field = if datalake_v3 {
            convert_to_datalake_v3(&descriptor.field)
        } else {
            descriptor.field.clone()
        };
        let token = format!("{{{name}}}");
        let fragment = format!("({field} is not null or {field} is null)");
        output = output.replace(&token, &fragment);
    }
    output
}

// ============================================================================
// SECTION: Runnable Query
// ============================================================================

/// Options for resolving a query template into runnable SQL.
///
/// # Invariants
/// - `json` is the raw filter definition payload exactly as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnableQueryOptions<'a> {
    /// Toggles the v3 identifier-quoting dialect transform.
    pub datalake_v3: bool,
    /// SQL template with zero or more `{name}` placeholders.
    pub sql: &'a str,
    /// Raw JSON filter definition payload, when supplied.
    pub json: Option<&'a str>,
    /// Runs the syntax gate and JSON-area cross checks when set.
    pub validate: bool,
}

/// Resolves a SQL template and filter map into runnable SQL.
///
/// Validated (non-internal) call paths keep `validate` set; internal replays
/// of already-validated templates may skip the gate.
///
/// # Errors
///
/// Returns [`QueryFilterError`] when the syntax gate rejects the SQL, the
/// JSON area mismatches the placeholder count, or the filter map is
/// malformed.
pub fn runnable_query(options: RunnableQueryOptions<'_>) -> Result<String, QueryFilterError> {
    if options.validate && !check_syntax(options.sql) {
        return Err(QueryFilterError::WrongSql);
    }
    let placeholders = extract_placeholders(options.sql);
    if options.validate {
        validate_json_area(placeholders.len(), options.json)?;
    }
    let filled = options.json.is_some_and(|raw| !raw.trim().is_empty());
    if !filled {
        return Ok(options.sql.to_string());
    }
    let json = options.json.unwrap_or_default();
    let filters = validate_filter_map(&placeholders, json)?;
    Ok(substitute(options.datalake_v3, &placeholders, &filters, options.sql))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
