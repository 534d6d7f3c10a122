// crates/query-filter/tests/template.rs
// ============================================================================
// Module: Query Template Tests
// Description: Validate placeholder matching, filter checks, and substitution.
// Purpose: Ensure typed errors and runnable SQL outputs are deterministic.
// Dependencies: query-filter, serde_json
// ============================================================================

//! Behavior tests for the query template resolution pipeline.

use query_filter::QueryFilterError;
use query_filter::RunnableQueryOptions;
use query_filter::runnable_query;

/// Builds default options for a template and filter payload.
const fn options<'a>(sql: &'a str, json: Option<&'a str>) -> RunnableQueryOptions<'a> {
    RunnableQueryOptions {
        datalake_v3: false,
        sql,
        json,
        validate: true,
    }
}

#[test]
fn substitutes_single_filter_into_null_check() -> Result<(), Box<dyn std::error::Error>> {
    let sql = "select {f1} from core_user";
    let json = r#"{"f1":{"field":"core_user.userid","type":"users"}}"#;
    let output = runnable_query(options(sql, Some(json)))?;
    assert_eq!(
        output,
        "select (core_user.userid is not null or core_user.userid is null) from core_user"
    );
    Ok(())
}

#[test]
fn substitution_is_idempotent_for_fixed_inputs() -> Result<(), Box<dyn std::error::Error>> {
    let sql = "select {f1}, {f2} from t";
    let json = concat!(
        r#"{"f1":{"field":"t.a","type":"courses"},"#,
        r#""f2":{"field":"t.b","type":"branches"}}"#
    );
    let first = runnable_query(options(sql, Some(json)))?;
    let second = runnable_query(options(sql, Some(json)))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn dialect_transform_applies_to_substituted_fields() -> Result<(), Box<dyn std::error::Error>> {
    let sql = "select {f1} from core_user";
    let json = r#"{"f1":{"field":"core_user.userId","type":"users"}}"#;
    let output = runnable_query(RunnableQueryOptions {
        datalake_v3: true,
        sql,
        json: Some(json),
        validate: true,
    })?;
    assert_eq!(
        output,
        "select (core_user.\"userid\" is not null or core_user.\"userid\" is null) \
         from core_user"
    );
    Ok(())
}

#[test]
fn rejects_forbidden_sql_with_wrong_sql_code() {
    let result = runnable_query(options("drop table t", None));
    assert_eq!(result, Err(QueryFilterError::WrongSql));
    assert_eq!(QueryFilterError::WrongSql.code(), 15);
}

#[test]
fn rejects_placeholders_without_json_area() {
    let result = runnable_query(options("select {f1} from t", None));
    assert_eq!(result, Err(QueryFilterError::JsonAreaEmpty));
}

#[test]
fn rejects_json_area_without_placeholders() {
    let json = r#"{"f1":{"field":"t.a","type":"users"}}"#;
    let result = runnable_query(options("select a from t", Some(json)));
    assert_eq!(result, Err(QueryFilterError::JsonAreaFilled));
}

#[test]
fn rejects_unparseable_json_area() {
    let result = runnable_query(options("select {f1} from t", Some("{not json")));
    assert_eq!(result, Err(QueryFilterError::WrongJson));
}

#[test]
fn duplicate_placeholders_allow_fewer_json_keys() -> Result<(), Box<dyn std::error::Error>> {
    // Two matches of the same placeholder but only one key: allowed, since the
    // key count is compared against occurrences rather than distinct names.
    let sql = "select {f1} from t where {f1}";
    let json = r#"{"f1":{"field":"t.a","type":"users"}}"#;
    let output = runnable_query(options(sql, Some(json)))?;
    assert_eq!(output, "select (t.a is not null or t.a is null) from t where (t.a is not null or t.a is null)");
    Ok(())
}

#[test]
fn rejects_more_json_keys_than_placeholder_matches() {
    let sql = "select {f1} from t";
    let json = concat!(
        r#"{"f1":{"field":"t.a","type":"users"},"#,
        r#""f2":{"field":"t.b","type":"courses"}}"#
    );
    let result = runnable_query(options(sql, Some(json)));
    assert_eq!(result, Err(QueryFilterError::MoreFilterInJson));
}

#[test]
fn rejects_placeholder_missing_from_json() {
    let sql = "select {f1}, {f2} from t";
    let json = concat!(
        r#"{"f1":{"field":"t.a","type":"users"},"#,
        r#""f3":{"field":"t.c","type":"courses"}}"#
    );
    let result = runnable_query(options(sql, Some(json)));
    assert_eq!(
        result,
        Err(QueryFilterError::FilterNotFoundInJson {
            name: "f2".to_string(),
        })
    );
}

#[test]
fn rejects_descriptor_without_field() {
    let json = r#"{"f1":{"type":"users"}}"#;
    let result = runnable_query(options("select {f1} from t", Some(json)));
    assert_eq!(
        result,
        Err(QueryFilterError::MissingFieldInJsonFilter {
            name: "f1".to_string(),
        })
    );
}

#[test]
fn rejects_descriptor_without_type() {
    let json = r#"{"f1":{"field":"t.a"}}"#;
    let result = runnable_query(options("select {f1} from t", Some(json)));
    assert_eq!(
        result,
        Err(QueryFilterError::MissingTypeInJsonFilter {
            name: "f1".to_string(),
        })
    );
}

#[test]
fn rejects_descriptor_with_unknown_type() {
    let json = r#"{"f1":{"field":"t.a","type":"widgets"}}"#;
    let result = runnable_query(options("select {f1} from t", Some(json)));
    assert_eq!(
        result,
        Err(QueryFilterError::WrongTypeInJsonFilter {
            name: "f1".to_string(),
        })
    );
}

#[test]
fn date_and_text_filters_require_description() -> Result<(), Box<dyn std::error::Error>> {
    let missing = r#"{"f1":{"field":"t.a","type":"date"}}"#;
    let result = runnable_query(options("select {f1} from t", Some(missing)));
    assert_eq!(
        result,
        Err(QueryFilterError::MissingDescriptionInJsonFilter {
            name: "f1".to_string(),
        })
    );

    let described = r#"{"f1":{"field":"t.a","type":"text","description":"Free text"}}"#;
    let output = runnable_query(options("select {f1} from t", Some(described)))?;
    assert_eq!(output, "select (t.a is not null or t.a is null) from t");
    Ok(())
}

#[test]
fn skipping_validation_bypasses_the_syntax_gate() -> Result<(), Box<dyn std::error::Error>> {
    // Internal call paths replay templates that were already validated.
    let output = runnable_query(RunnableQueryOptions {
        datalake_v3: false,
        sql: "drop table t",
        json: None,
        validate: false,
    })?;
    assert_eq!(output, "drop table t");
    Ok(())
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(QueryFilterError::WrongJson.code(), 16);
    assert_eq!(QueryFilterError::JsonAreaEmpty.code(), 17);
    assert_eq!(QueryFilterError::JsonAreaFilled.code(), 18);
    assert_eq!(QueryFilterError::MoreFilterInJson.code(), 19);
    assert_eq!(
        QueryFilterError::FilterNotFoundInJson {
            name: String::new(),
        }
        .code(),
        20
    );
    assert_eq!(
        QueryFilterError::MissingDescriptionInJsonFilter {
            name: String::new(),
        }
        .code(),
        24
    );
}
