//! Source file discovery and destination paths.

use std::fs;
use std::path::{Path, PathBuf};

use gentests_core::conventions::{SOURCE_EXTENSION, is_test_file_stem, test_file_name};

use super::EngineError;

/// Resolve `path` to the Rust source files tests should be generated for.
///
/// A file resolves to itself; a directory to its direct `.rs` children, sorted. Generated test files
/// (`*_tests.rs`) are never sources.
pub fn source_files(path: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let metadata = fs::metadata(path).map_err(|e| EngineError::io(path, e))?;

    let mut files = Vec::new();
    if metadata.is_dir() {
        let entries = fs::read_dir(path).map_err(|e| EngineError::io(path, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| EngineError::io(path, e))?;
            let entry_path = entry.path();
            if entry_path.is_file() && is_source_file(&entry_path) {
                files.push(entry_path);
            }
        }
        files.sort();
    } else if is_source_file(path) {
        files.push(path.to_path_buf());
    }

    if files.is_empty() {
        return Err(EngineError::NoSourceFiles {
            path: path.to_path_buf(),
        });
    }
    Ok(files)
}

/// Destination of the tests for `src` (`dir/foo.rs` -> `dir/foo_tests.rs`).
pub fn test_path_for(src: &Path) -> PathBuf {
    let stem = src.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    src.with_file_name(test_file_name(stem))
}

fn is_source_file(path: &Path) -> bool {
    let is_rust = path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    is_rust && !stem.is_empty() && !is_test_file_stem(stem)
}
