//! Schema File Resolution
//!
//! Expands include globs into a deduplicated, sorted list of absolute
//! schema file paths and drops everything matched by an exclude glob.
//!
//! Patterns follow the usual globbing rules: `*` and `?` stop at `/`,
//! `**` spans directories. Relative patterns are anchored at the root.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use crate::config::CompileConfig;
use crate::error::{Result, SchemaError};

/// Resolve every schema file named by `config`, relative to `root`
pub fn resolve_files(config: &CompileConfig, root: &Path) -> Result<Vec<PathBuf>> {
    let root = root.canonicalize()?;
    let includes = config.include_patterns();
    let excludes = build_excludes(&root, &config.exclude)?;

    let mut files = BTreeSet::new();
    for pattern in &includes {
        for path in expand_pattern(&root, pattern)? {
            if is_excluded(&excludes, &root, &path) {
                tracing::debug!(path = %path.display(), "excluded");
                continue;
            }
            files.insert(path);
        }
    }

    tracing::info!(
        patterns = includes.len(),
        files = files.len(),
        "resolved schema files"
    );

    if files.is_empty() {
        return Err(SchemaError::NoSchemasFound);
    }
    Ok(files.into_iter().collect())
}

/// Walk the literal prefix of `pattern` and return the canonical paths of
/// every file the glob matches
fn expand_pattern(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let (prefix, glob) = split_pattern(pattern);
    let base = root.join(&prefix);

    // Compile the glob first so a bad pattern fails whether or not its
    // base directory exists
    let overrides = match &glob {
        Some(glob) => {
            let mut builder = OverrideBuilder::new(&base);
            builder
                .add(&format!("/{glob}"))
                .map_err(|e| SchemaError::pattern(pattern, e))?;
            Some(
                builder
                    .build()
                    .map_err(|e| SchemaError::pattern(pattern, e))?,
            )
        }
        None => None,
    };

    if !base.exists() {
        tracing::warn!(pattern, base = %base.display(), "pattern base does not exist");
        return Ok(Vec::new());
    }

    // A pattern without metacharacters names a single file
    let Some(overrides) = overrides else {
        return Ok(canonical_file(&base).into_iter().collect());
    };

    let walker = WalkBuilder::new(&base)
        .standard_filters(false)
        .hidden(true)
        .follow_links(true)
        .overrides(overrides)
        .build();

    let mut matched = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(pattern, error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(path) = canonical_file(entry.path()) {
            matched.push(path);
        }
    }

    tracing::debug!(pattern, matched = matched.len(), "expanded pattern");
    Ok(matched)
}

fn canonical_file(path: &Path) -> Option<PathBuf> {
    match path.canonicalize() {
        Ok(path) if path.is_file() => Some(path),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot canonicalize");
            None
        }
    }
}

/// Split a pattern into its literal directory prefix and the glob remainder.
///
/// `schemas/core/**/*.json` → (`schemas/core`, `Some("**/*.json")`).
/// A pattern with no metacharacters returns the whole pattern and `None`.
fn split_pattern(pattern: &str) -> (PathBuf, Option<String>) {
    let normalized = pattern.replace('\\', "/");
    let normalized = normalized.trim_start_matches("./");
    let segments: Vec<&str> = normalized.split('/').collect();

    match segments.iter().position(|s| has_glob_meta(s)) {
        None => (PathBuf::from(normalized), None),
        Some(idx) => {
            let mut prefix = segments[..idx].join("/");
            if prefix.is_empty() && normalized.starts_with('/') {
                prefix.push('/');
            }
            let glob = segments[idx..].join("/");
            (PathBuf::from(prefix), Some(glob))
        }
    }
}

fn has_glob_meta(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

fn build_excludes(root: &Path, patterns: &[String]) -> Result<Gitignore> {
    let mut builder = GitignoreBuilder::new(root);
    for pattern in patterns {
        let Some(anchored) = anchor_exclude(root, pattern) else {
            tracing::warn!(pattern, "exclude pattern lies outside the root; ignored");
            continue;
        };
        builder
            .add_line(None, &anchored)
            .map_err(|e| SchemaError::pattern(pattern, e))?;
    }
    builder.build().map_err(|e| {
        SchemaError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        }
    })
}

/// Rewrite an exclude glob so it only matches relative to the root
fn anchor_exclude(root: &Path, pattern: &str) -> Option<String> {
    let normalized = pattern.replace('\\', "/");
    let relative = if Path::new(&normalized).is_absolute() {
        let rel = Path::new(&normalized).strip_prefix(root).ok()?;
        rel.to_string_lossy().replace('\\', "/")
    } else {
        normalized
            .trim_start_matches("./")
            .to_string()
    };

    if relative.starts_with("**") {
        Some(relative)
    } else {
        Some(format!("/{}", relative.trim_start_matches('/')))
    }
}

fn is_excluded(excludes: &Gitignore, root: &Path, path: &Path) -> bool {
    if excludes.is_empty() || !path.starts_with(root) {
        return false;
    }
    let relative = match path.strip_prefix(root) {
        Ok(rel) if rel.components().all(|c| matches!(c, Component::Normal(_))) => rel,
        _ => return false,
    };
    excludes
        .matched_path_or_any_parents(relative, false)
        .is_ignore()
}
