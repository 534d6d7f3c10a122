// crates/query-filter/src/syntax.rs
// ============================================================================
// Module: SQL Syntax Gate
// Description: Static rejection of destructive and wildcard SQL shapes.
// Purpose: Block DDL/admin statements and bare selects before substitution.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! The syntax gate is a static pre-filter applied before any placeholder work.
//! It rejects blank input, wildcard selects, and a fixed blocklist of
//! DDL/admin statements. It is intentionally shallow: statements that pass the
//! gate are still validated downstream by the query engine itself.
//!
//! The blocklist literal `inser into` (sic) reproduces the observed production
//! behavior; a well-formed `INSERT INTO` is not caught by that branch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use regex::RegexBuilder;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Blocked statement shapes, matched case-insensitively on normalized SQL.
const BLOCKED_STATEMENTS: [&str; 17] = [
    "alter table",
    "create database",
    "create table",
    "create view",
    "drop database",
    "drop table",
    "drop view",
    "msck repair table",
    "show columns",
    "show create table",
    "show create view",
    "show databases",
    "show partitions",
    "show tables",
    "show tblproperties",
    "show views",
    "inser into",
];

/// Matches `select *` with any spacing between keyword and wildcard.
static SELECT_STAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
    RegexBuilder::new(r"select\s+\*")
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});

/// Matches a comma-separated bare wildcard inside a projection list.
static BARE_STAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
    Regex::new(r",\s*\*").expect("valid regex")
});

/// Collapses runs of whitespace after newline normalization.
static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
    Regex::new(r"\s+").expect("valid regex")
});

// ============================================================================
// SECTION: Syntax Gate
// ============================================================================

/// Checks whether a SQL template passes the static syntax gate.
///
/// Returns `false` for blank input, wildcard selects, and any statement on the
/// DDL/admin blocklist. The check is pure and has no side effects.
#[must_use]
pub fn check_syntax(sql: &str) -> bool {
    let normalized = normalize(sql);
    if normalized.is_empty() {
        return false;
    }
    if SELECT_STAR_RE.is_match(&normalized) || BARE_STAR_RE.is_match(&normalized) {
        return false;
    }
    let lowered = normalized.to_lowercase();
    !BLOCKED_STATEMENTS.iter().any(|blocked| lowered.contains(blocked))
}

/// Normalizes SQL: newlines become spaces, whitespace runs collapse, ends trimmed.
fn normalize(sql: &str) -> String {
    let unified = sql.replace(['\r', '\n'], " ");
    WHITESPACE_RUN_RE.replace_all(&unified, " ").trim().to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::check_syntax;

    #[test]
    fn accepts_plain_projection() {
        assert!(check_syntax("SELECT a,b FROM t"));
    }

    #[test]
    fn rejects_blank_and_whitespace_input() {
        assert!(!check_syntax(""));
        assert!(!check_syntax("   \n\t  "));
    }

    #[test]
    fn rejects_wildcard_selects() {
        assert!(!check_syntax("select * from t"));
        assert!(!check_syntax("SELECT   *   FROM t"));
        assert!(!check_syntax("select a, * from t"));
    }

    #[test]
    fn rejects_blocked_statements_case_insensitively() {
        assert!(!check_syntax("DROP TABLE t"));
        assert!(!check_syntax("create view v as select a from t"));
        assert!(!check_syntax("MSCK REPAIR TABLE logs"));
        assert!(!check_syntax("show\n  tables"));
    }

    #[test]
    fn insert_into_passes_the_blocklist_branch() {
        // The blocklist carries the literal "inser into"; a well-formed
        // INSERT INTO does not match it.
        assert!(check_syntax("insert into t values (1)"));
        assert!(!check_syntax("inser into t values (1)"));
    }

    #[test]
    fn normalizes_newlines_before_matching() {
        assert!(!check_syntax("select\n*\nfrom t"));
        assert!(check_syntax("select a,\nb from t"));
    }
}
