//! Test generation engine.
//!
//! The orchestration in [`crate::process`] only sees the [`Generator`] trait: give it a path and
//! [`EngineOptions`], get back zero or more [`GeneratedTest`]s or an [`EngineError`]. This module also ships the
//! default implementation for Rust sources, [`RustTestGenerator`].
//!
//! ## Pipeline
//!
//! path → [`files::source_files`] → per file: `gentests_syntax::parse_functions` → [`filter::select`] (drops
//! already-tested functions) → [`emit::emit_tests`] → one `GeneratedTest` per file with at least one function.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod emit;
pub mod files;
pub mod filter;

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gentests_syntax::{FunctionSignature, ParseError};
use regex::Regex;
use thiserror::Error;

// ============================================================================
// Engine contract
// ============================================================================

/// Validated options handed to the engine.
///
/// Built by [`crate::process::parse_options`]; `None` patterns mean "no filter".
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub only: Option<Regex>,
    pub exclude: Option<Regex>,
    pub exported: bool,
    pub print_inputs: bool,
}

/// One function a test was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    /// `Type::name` or `name`
    pub qualified_name: String,
    test_name: String,
}

impl GeneratedFunction {
    pub fn new(qualified_name: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            test_name: test_name.into(),
        }
    }

    /// Name of the generated test function.
    pub fn test_name(&self) -> &str {
        &self.test_name
    }
}

impl From<&FunctionSignature> for GeneratedFunction {
    fn from(sig: &FunctionSignature) -> Self {
        Self::new(sig.qualified_name(), sig.test_name())
    }
}

/// Generated test code for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTest {
    /// Where the test file belongs.
    pub path: PathBuf,
    /// Complete file contents.
    pub output: Vec<u8>,
    /// Generated tests, in output order.
    pub functions: Vec<GeneratedFunction>,
}

/// Errors that fail a whole path.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No source files found at {}", path.display())]
    NoSourceFiles { path: PathBuf },

    #[error("{}:{source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{}: code generation failed: {message}", path.display())]
    Emit { path: PathBuf, message: String },
}

impl EngineError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A source of generated tests.
///
/// Implementations must not write to the filesystem; persisting output is the caller's job.
pub trait Generator {
    /// Generate tests for a file or directory.
    ///
    /// Returns an empty list when nothing matched the options.
    fn generate(&self, path: &Path, options: &EngineOptions) -> Result<Vec<GeneratedTest>, EngineError>;
}

// ============================================================================
// Default engine
// ============================================================================

/// Configuration of [`RustTestGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Prepend a `// Generated by gentests` comment to new test files.
    pub version_header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { version_header: true }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version_header(mut self, enabled: bool) -> Self {
        self.version_header = enabled;
        self
    }
}

/// Generates table-driven test skeletons for Rust source files.
///
/// For `dir/foo.rs` the output belongs in `dir/foo_tests.rs`. If that file already exists, functions that
/// already have a test there are skipped and new tests are appended to its current contents.
#[derive(Debug, Clone, Default)]
pub struct RustTestGenerator {
    config: GeneratorConfig,
}

impl RustTestGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    #[tracing::instrument(skip_all, fields(file = %src.display()))]
    fn generate_file(&self, src: &Path, options: &EngineOptions) -> Result<Option<GeneratedTest>, EngineError> {
        let source = fs::read_to_string(src).map_err(|e| EngineError::io(src, e))?;
        let functions = gentests_syntax::parse_functions(&source).map_err(|source| EngineError::Parse {
            path: src.to_path_buf(),
            source,
        })?;

        let dest = files::test_path_for(src);
        let existing = read_existing(&dest)?;
        let existing_names = match &existing {
            Some(contents) => gentests_syntax::parse_test_names(contents).map_err(|source| EngineError::Parse {
                path: dest.clone(),
                source,
            })?,
            None => HashSet::new(),
        };

        let selected = filter::select(&functions, options, &existing_names);
        if selected.is_empty() {
            tracing::debug!("no functions selected");
            return Ok(None);
        }

        let tests = emit::emit_tests(&selected, options.print_inputs).map_err(|message| EngineError::Emit {
            path: src.to_path_buf(),
            message,
        })?;
        let output = match existing {
            Some(contents) => emit::append_tests(&contents, &tests),
            None => emit::new_test_file(&tests, self.config.version_header),
        };

        Ok(Some(GeneratedTest {
            path: dest,
            output: output.into_bytes(),
            functions: selected.iter().map(|sig| GeneratedFunction::from(*sig)).collect(),
        }))
    }
}

impl Generator for RustTestGenerator {
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    fn generate(&self, path: &Path, options: &EngineOptions) -> Result<Vec<GeneratedTest>, EngineError> {
        let sources = files::source_files(path)?;
        let mut generated = Vec::new();
        for src in &sources {
            if let Some(test) = self.generate_file(src, options)? {
                generated.push(test);
            }
        }
        Ok(generated)
    }
}

/// Read the current destination file, if any.
fn read_existing(dest: &Path) -> Result<Option<String>, EngineError> {
    match fs::read_to_string(dest) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(EngineError::io(dest, e)),
    }
}
