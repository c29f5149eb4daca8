//! Run report and exit status

use std::fmt;

use crate::schema::{CompileError, Problem};

/// Exit status when every schema compiled
pub const EXIT_OK: i32 = 0;
/// Exit status for setup failures and unexpected errors
pub const EXIT_FATAL: i32 = 1;
/// Exit status when problems or compile errors were found
pub const EXIT_ISSUES: i32 = 2;

/// Outcome of a full compile run
#[derive(Debug, Default)]
pub struct Report {
    /// Number of schemas handed to the compiler pass
    pub compiled: usize,
    pub problems: Vec<Problem>,
    pub compile_errors: Vec<CompileError>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty() && self.compile_errors.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            EXIT_OK
        } else {
            EXIT_ISSUES
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(
                f,
                "OK: Compiled {} schemas with no unresolved refs.",
                self.compiled
            );
        }

        writeln!(f, "Schema compile finished with issues.")?;
        if !self.problems.is_empty() {
            writeln!(f, "\nProblems (missing $id / parse):")?;
            for problem in &self.problems {
                writeln!(f, "- {problem}")?;
            }
        }
        if !self.compile_errors.is_empty() {
            writeln!(f, "\nCompile errors:")?;
            for error in &self.compile_errors {
                writeln!(f, "- {error}")?;
            }
        }
        Ok(())
    }
}
