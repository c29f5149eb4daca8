//! Full compile run: config → files → registry → compile → report

use std::path::Path;

use crate::compiler::compile_all;
use crate::config::CompileConfig;
use crate::error::Result;
use crate::loader::load_schemas;
use crate::registry::SchemaRegistry;
use crate::report::Report;
use crate::resolve::resolve_files;

/// Run the compile pipeline for the repository at `root`.
///
/// Returns `Err` only for run-aborting failures (missing config, no schema
/// files, I/O). Per-file issues are collected into the [`Report`].
pub fn run(root: &Path) -> Result<Report> {
    let config = CompileConfig::load(root)?;
    run_with_config(&config, root)
}

/// Same as [`run`] with an already loaded config
pub fn run_with_config(config: &CompileConfig, root: &Path) -> Result<Report> {
    let files = resolve_files(config, root)?;

    let mut registry = SchemaRegistry::from_config(config)?;
    let loaded = load_schemas(&files, &mut registry);
    let compile_errors = compile_all(&registry, &loaded.records);

    Ok(Report {
        compiled: loaded.records.len(),
        problems: loaded.problems,
        compile_errors,
    })
}
