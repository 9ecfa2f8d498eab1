//! Batch orchestration: validate options, run the engine per path, dispatch each result.
//!
//! ## Components
//!
//! - [`options`] - raw options → [`crate::engine::EngineOptions`] or a one-line validation failure
//! - [`paths`] - per-path engine invocation; failures never abort the batch
//! - [`output`] - write each result to disk or stream it, reporting generated test names
//!
//! ## Design
//!
//! Every outcome is reported as a single line on the output sink, in call order. The only error these functions
//! return is a failure to write to the sink itself.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod options;
pub mod output;
pub mod paths;

use std::io::{self, Write};
use std::path::Path;

use gentests_core::messages::MISSING_PATHS_MSG;

use crate::engine::Generator;

pub use options::{Options, OptionsError, PatternField, parse_options};
pub use output::{OutputMode, output_test};
pub use paths::generate_tests;

/// Run a whole batch.
///
/// Options are validated first; a validation failure or an empty `paths` list is reported once and nothing else
/// happens. Otherwise each path is processed in order with the output mode selected from `options`.
#[tracing::instrument(skip_all, fields(paths = paths.len()))]
pub fn run<W, P, G>(out: &mut W, paths: &[P], options: &Options, generator: &G) -> io::Result<()>
where
    W: Write + ?Sized,
    P: AsRef<Path>,
    G: Generator + ?Sized,
{
    let engine_options = match parse_options(options) {
        Ok(engine_options) => engine_options,
        Err(e) => {
            tracing::debug!(error = %e, "invalid options");
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    if paths.is_empty() {
        writeln!(out, "{MISSING_PATHS_MSG}")?;
        return Ok(());
    }

    let mode = OutputMode::from_options(options);
    for path in paths {
        generate_tests(out, path.as_ref(), &mode, &engine_options, generator)?;
    }
    Ok(())
}
