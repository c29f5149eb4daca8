//! Schema Loading
//!
//! Reads every resolved file, extracts its `$id` and registers it. Each file
//! is handled independently: a failure becomes a [`Problem`] and loading
//! moves on to the next file.

use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::registry::SchemaRegistry;
use crate::schema::{schema_id, Problem, SchemaRecord};

/// Everything the loading pass produced
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Registered schemas, in file order
    pub records: Vec<SchemaRecord>,
    /// Files that never reached the registry
    pub problems: Vec<Problem>,
}

/// Load and register every file with `registry`
pub fn load_schemas(files: &[PathBuf], registry: &mut SchemaRegistry) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "unreadable schema file");
                outcome.problems.push(Problem::read(path, &err));
                continue;
            }
        };

        let document: Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "invalid JSON");
                outcome.problems.push(Problem::parse(path, &err));
                continue;
            }
        };

        let Some(id) = schema_id(&document).map(str::to_string) else {
            tracing::debug!(path = %path.display(), "schema has no $id");
            outcome.problems.push(Problem::missing_id(path));
            continue;
        };

        if let Err(dup) = registry.register(&id, path, document.clone()) {
            outcome.problems.push(Problem::duplicate_id(path, &dup));
            continue;
        }
        outcome.records.push(SchemaRecord::new(id, path.clone(), document));
    }

    tracing::info!(
        files = files.len(),
        registered = outcome.records.len(),
        problems = outcome.problems.len(),
        "loaded schemas"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ProblemKind;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_all_files() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "a.json", r#"{ "$id": "a", "type": "object" }"#),
            write(dir.path(), "broken.json", r#"{ "$id": "broken", "#),
            write(dir.path(), "anon.json", r#"{ "type": "string" }"#),
            write(dir.path(), "b.json", r#"{ "$id": "b", "$ref": "a" }"#),
        ];

        let mut registry = SchemaRegistry::new();
        let outcome = load_schemas(&files, &mut registry);

        let ids: Vec<_> = outcome.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(registry.len(), 2);

        let kinds: Vec<_> = outcome.problems.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![ProblemKind::Parse, ProblemKind::MissingId]);
        assert!(outcome.problems[0].message.starts_with("Parse error:"));
        assert_eq!(outcome.problems[1].message, "Missing $id");
        assert!(!registry.contains("broken"));
    }

    #[test]
    fn test_duplicate_id_is_a_problem() {
        let dir = tempdir().unwrap();
        let first = write(dir.path(), "a.json", r#"{ "$id": "a" }"#);
        let second = write(dir.path(), "a-copy.json", r#"{ "$id": "a", "type": "null" }"#);

        let mut registry = SchemaRegistry::new();
        let outcome = load_schemas(&[first.clone(), second.clone()], &mut registry);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].path, first);
        assert_eq!(outcome.problems.len(), 1);
        assert_eq!(outcome.problems[0].kind, ProblemKind::DuplicateId);
        assert_eq!(outcome.problems[0].path, second);
        assert_eq!(
            outcome.problems[0].message,
            format!("schema with $id 'a' already registered by {}", first.display())
        );
    }

    #[test]
    fn test_unreadable_file_is_a_problem() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.json");

        let mut registry = SchemaRegistry::new();
        let outcome = load_schemas(&[missing], &mut registry);

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.problems[0].kind, ProblemKind::Read);
    }
}
