//! Schema records and per-file findings

use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::registry::DuplicateId;

/// Keyword carrying a schema's identifier
pub const ID_KEYWORD: &str = "$id";

/// Read a schema's identifier.
///
/// Returns `None` when the keyword is absent, not a string, or the empty
/// string. Any other string, whitespace included, is an identifier.
pub fn schema_id(document: &Value) -> Option<&str> {
    document
        .get(ID_KEYWORD)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// A schema that loaded, carried an identifier and was registered
#[derive(Debug, Clone)]
pub struct SchemaRecord {
    /// The `$id` the schema was registered under
    pub id: String,
    /// Absolute path of the source file
    pub path: PathBuf,
    /// The parsed document
    pub document: Value,
}

impl SchemaRecord {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, document: Value) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            document,
        }
    }
}

/// Why a file never reached the compiler pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// The file could not be read
    Read,
    /// The file is not valid JSON
    Parse,
    /// The document has no usable `$id`
    MissingId,
    /// Another file already registered the same `$id`
    DuplicateId,
}

/// A file that failed to load or register
#[derive(Debug, Clone)]
pub struct Problem {
    pub path: PathBuf,
    pub kind: ProblemKind,
    pub message: String,
}

impl Problem {
    pub fn read(path: &Path, err: &std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: ProblemKind::Read,
            message: format!("Read error: {err}"),
        }
    }

    pub fn parse(path: &Path, err: &serde_json::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: ProblemKind::Parse,
            message: format!("Parse error: {err}"),
        }
    }

    pub fn missing_id(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: ProblemKind::MissingId,
            message: format!("Missing {ID_KEYWORD}"),
        }
    }

    pub fn duplicate_id(path: &Path, err: &DuplicateId) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: ProblemKind::DuplicateId,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.path.display(), self.message)
    }
}

/// A registered schema that failed to compile
#[derive(Debug, Clone)]
pub struct CompileError {
    pub id: String,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) => {}", self.path.display(), self.id, self.message)
    }
}
