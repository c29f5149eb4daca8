//! Compiler Pass
//!
//! Compiles every registered schema against the full registry. A failing
//! schema is recorded and the pass continues with the next one.

use crate::registry::SchemaRegistry;
use crate::schema::{CompileError, SchemaRecord};

/// Compile each record in order, collecting the failures
pub fn compile_all(registry: &SchemaRegistry, records: &[SchemaRecord]) -> Vec<CompileError> {
    let mut errors = Vec::new();

    for record in records {
        match registry.compile(&record.document) {
            Ok(_) => tracing::debug!(id = %record.id, "compiled"),
            Err(message) => {
                tracing::debug!(id = %record.id, error = %message, "compile failed");
                errors.push(CompileError {
                    id: record.id.clone(),
                    path: record.path.clone(),
                    message,
                });
            }
        }
    }

    tracing::info!(
        schemas = records.len(),
        failed = errors.len(),
        "compiled schemas"
    );
    errors
}
