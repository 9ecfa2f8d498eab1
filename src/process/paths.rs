//! Per-path processing.

use std::io::{self, Write};
use std::path::Path;

use gentests_core::messages::NO_TESTS_PREFIX;

use super::output::{OutputMode, output_test};
use crate::engine::{EngineOptions, Generator};

/// Generate tests for one path and dispatch every result.
///
/// - engine error: its message, verbatim, on one line
/// - no results: `No tests generated for <path>`
/// - otherwise: each result through [`output_test`], in engine order
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn generate_tests<W, G>(
    out: &mut W,
    path: &Path,
    mode: &OutputMode,
    options: &EngineOptions,
    generator: &G,
) -> io::Result<()>
where
    W: Write + ?Sized,
    G: Generator + ?Sized,
{
    let tests = match generator.generate(path, options) {
        Ok(tests) => tests,
        Err(e) => {
            tracing::debug!(error = %e, "engine failed");
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    if tests.is_empty() {
        writeln!(out, "{NO_TESTS_PREFIX} {}", path.display())?;
        return Ok(());
    }

    tracing::debug!(results = tests.len(), "generated");
    for test in &tests {
        output_test(out, test, mode)?;
    }
    Ok(())
}
