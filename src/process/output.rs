//! Output dispatch for generated tests.
//!
//! The mode is chosen once per run. A result is either persisted or streamed, never both:
//!
//! - `PersistToFile`: write → on failure report and stop → otherwise print names
//! - `StreamToSink`: print names → write the raw content to the sink

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use gentests_core::conventions::NEW_FILE_PERMISSIONS;
use gentests_core::messages::GENERATED_PREFIX;

use super::Options;
use crate::engine::GeneratedTest;

/// Where generated test code goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Create or truncate the result's destination file. `permissions` applies when the file is created (Unix).
    PersistToFile { permissions: u32 },
    /// Write the raw content to the output sink.
    StreamToSink,
}

impl OutputMode {
    /// `PersistToFile` with the default `0o644` permissions.
    pub fn persist() -> Self {
        Self::PersistToFile {
            permissions: NEW_FILE_PERMISSIONS,
        }
    }

    pub fn from_options(options: &Options) -> Self {
        if options.write_output {
            Self::persist()
        } else {
            Self::StreamToSink
        }
    }
}

/// Dispatch one generated test.
///
/// A failed file write is reported as `<path>: <error>` and ends this result without printing any names.
#[tracing::instrument(skip_all, fields(dest = %test.path.display()))]
pub fn output_test<W: Write + ?Sized>(out: &mut W, test: &GeneratedTest, mode: &OutputMode) -> io::Result<()> {
    if let OutputMode::PersistToFile { permissions } = *mode {
        if let Err(e) = write_file(&test.path, &test.output, permissions) {
            tracing::debug!(error = %e, "write failed");
            writeln!(out, "{}: {e}", test.path.display())?;
            return Ok(());
        }
        tracing::debug!(bytes = test.output.len(), "wrote test file");
    }

    for function in &test.functions {
        writeln!(out, "{GENERATED_PREFIX} {}", function.test_name())?;
    }

    if *mode == OutputMode::StreamToSink {
        out.write_all(&test.output)?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &[u8], permissions: u32) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(permissions);
    }
    #[cfg(not(unix))]
    let _ = permissions;

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}
