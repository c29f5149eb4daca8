//! End-to-end tests for the compile pipeline
//!
//! Each test builds a throwaway repository with a config file and schema
//! files, then runs the whole pipeline against it.

use std::fs;
use std::path::Path;

use schema_compile::report::{EXIT_ISSUES, EXIT_OK};
use schema_compile::{run, ProblemKind, SchemaError};
use tempfile::{tempdir, TempDir};

const CORE_CONFIG: &str = r#"{ "folders": { "core": "schemas/core" } }"#;

fn repo(config: &str) -> TempDir {
    let dir = tempdir().unwrap();
    write(dir.path(), "schema/schema-compile.config.json", config);
    dir
}

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

// =============================================================================
// Setup failures
// =============================================================================

#[test]
fn test_missing_config_aborts() {
    let dir = tempdir().unwrap();
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a" }"#);

    let err = run(dir.path()).unwrap_err();
    assert!(matches!(err, SchemaError::ConfigNotFound { .. }));
}

#[test]
fn test_no_schema_files_aborts() {
    let dir = repo(CORE_CONFIG);
    fs::create_dir_all(dir.path().join("schemas/core")).unwrap();

    let err = run(dir.path()).unwrap_err();
    assert!(matches!(err, SchemaError::NoSchemasFound));
    assert_eq!(err.to_string(), "No schema files found to compile.");
}

// =============================================================================
// Clean runs
// =============================================================================

#[test]
fn test_reference_between_schemas() {
    let dir = repo(CORE_CONFIG);
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a", "type": "object" }"#);
    write(dir.path(), "schemas/core/b.json", r#"{ "$id": "b", "$ref": "a" }"#);

    let report = run(dir.path()).unwrap();
    assert_eq!(report.exit_code(), EXIT_OK);
    assert_eq!(
        report.to_string(),
        "OK: Compiled 2 schemas with no unresolved refs.\n"
    );
}

#[test]
fn test_independent_schemas_all_compile() {
    let dir = repo(CORE_CONFIG);
    for i in 0..5 {
        write(
            dir.path(),
            &format!("schemas/core/nested/s{i}.json"),
            &format!(r#"{{ "$id": "s{i}", "type": "object", "properties": {{ "n": {{ "type": "integer" }} }} }}"#),
        );
    }

    let report = run(dir.path()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.compiled, 5);
}

#[test]
fn test_overlapping_globs_load_once() {
    let dir = repo(
        r#"{
            "folders": { "core": "schemas/core", "all": "schemas" },
            "include": ["schemas/core/a.json", "schemas/**/*.json"]
        }"#,
    );
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a", "type": "object" }"#);

    let report = run(dir.path()).unwrap();
    // Loading the same file twice would surface as a duplicate $id
    assert!(report.is_clean(), "{report}");
    assert_eq!(report.compiled, 1);
}

#[test]
fn test_excluded_files_are_not_loaded() {
    let dir = repo(
        r#"{
            "folders": { "core": "schemas/core" },
            "exclude": ["schemas/core/legacy/**"]
        }"#,
    );
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a" }"#);
    write(dir.path(), "schemas/core/legacy/old.json", r#"{ "not json"#);

    let report = run(dir.path()).unwrap();
    assert!(report.is_clean(), "{report}");
    assert_eq!(report.compiled, 1);
}

// =============================================================================
// Runs with issues
// =============================================================================

#[test]
fn test_unresolved_reference() {
    let dir = repo(CORE_CONFIG);
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a", "type": "object" }"#);
    write(dir.path(), "schemas/core/b.json", r#"{ "$id": "b", "$ref": "missing" }"#);

    let report = run(dir.path()).unwrap();
    assert_eq!(report.exit_code(), EXIT_ISSUES);
    assert!(report.problems.is_empty());
    assert_eq!(report.compile_errors.len(), 1);
    assert_eq!(report.compile_errors[0].id, "b");
    assert!(report.compile_errors[0].path.ends_with("schemas/core/b.json"));

    let text = report.to_string();
    assert!(text.starts_with("Schema compile finished with issues.\n"));
    assert!(text.contains("\nCompile errors:\n- "));
}

#[test]
fn test_missing_id_never_compiled() {
    let dir = repo(CORE_CONFIG);
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a" }"#);
    write(dir.path(), "schemas/core/anon.json", r#"{ "$ref": "nowhere" }"#);

    let report = run(dir.path()).unwrap();
    assert_eq!(report.exit_code(), EXIT_ISSUES);
    assert_eq!(report.compiled, 1);
    assert_eq!(report.problems.len(), 1);
    assert_eq!(report.problems[0].kind, ProblemKind::MissingId);
    assert!(report.compile_errors.is_empty());
}

#[test]
fn test_reference_to_unparseable_schema_fails() {
    let dir = repo(CORE_CONFIG);
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a", "type": "#);
    write(dir.path(), "schemas/core/b.json", r#"{ "$id": "b", "$ref": "a" }"#);
    write(dir.path(), "schemas/core/c.json", r#"{ "$id": "c", "type": "string" }"#);

    let report = run(dir.path()).unwrap();
    assert_eq!(report.exit_code(), EXIT_ISSUES);
    assert_eq!(report.compiled, 2);

    assert_eq!(report.problems.len(), 1);
    assert_eq!(report.problems[0].kind, ProblemKind::Parse);
    assert!(report.problems[0].path.ends_with("schemas/core/a.json"));

    assert_eq!(report.compile_errors.len(), 1);
    assert_eq!(report.compile_errors[0].id, "b");
}

#[test]
fn test_extra_include_outside_folders() {
    let dir = repo(
        r#"{
            "folders": { "core": "schemas/core" },
            "include": ["contracts/*.schema.json"]
        }"#,
    );
    write(dir.path(), "schemas/core/a.json", r#"{ "$id": "a", "type": "object" }"#);
    write(
        dir.path(),
        "contracts/order.schema.json",
        r#"{ "$id": "order", "type": "object", "properties": { "a": { "$ref": "a" } } }"#,
    );
    write(dir.path(), "contracts/notes.json", r#"{ "not": "a schema file" }"#);

    let report = run(dir.path()).unwrap();
    assert!(report.is_clean(), "{report}");
    assert_eq!(report.compiled, 2);
}
