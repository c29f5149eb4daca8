//! Schema Compile Check
//!
//! Discovers every JSON Schema in a repository, registers each one by `$id`
//! and checks that it compiles: the document is a valid schema and every
//! cross-schema `$ref` resolves to another registered schema. No instance
//! data is ever validated.
//!
//! ## Pipeline
//!
//! ```text
//! schema/schema-compile.config.json
//!   └─ config    folders / include / exclude
//!      └─ resolve   glob expansion, deduplicated absolute paths
//!         └─ loader    parse + $id + register   → Problems
//!            └─ compiler  build each schema     → CompileErrors
//!               └─ report    exit 0 (clean) / 2 (issues)
//! ```
//!
//! Setup failures (missing config, no schema files) abort the run before
//! anything is loaded.

pub mod compiler;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod schema;

pub use config::CompileConfig;
pub use error::{Result, SchemaError};
pub use pipeline::run;
pub use registry::SchemaRegistry;
pub use report::Report;
pub use schema::{CompileError, Problem, ProblemKind, SchemaRecord};
