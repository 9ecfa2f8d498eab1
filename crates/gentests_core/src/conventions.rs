//! Shared file and identifier conventions.

/// Entry point function name. Never gets a generated test.
pub const ENTRYPOINT_NAME: &str = "main";

/// Extension of Rust source files.
pub const SOURCE_EXTENSION: &str = "rs";

/// Stem suffix of generated test files (`foo.rs` -> `foo_tests.rs`).
pub const TEST_FILE_SUFFIX: &str = "_tests";

/// Prefix of generated test function names.
pub const TEST_FN_PREFIX: &str = "test_";

/// Attribute marking a test function.
pub const TEST_ATTRIBUTE: &str = "test";

/// Permission bits for newly created test files (`rw-r--r--`).
pub const NEW_FILE_PERMISSIONS: u32 = 0o644;

/// Check whether a file stem names a generated test file.
pub fn is_test_file_stem(stem: &str) -> bool {
    stem.ends_with(TEST_FILE_SUFFIX)
}

/// Destination file name for the tests of a source file stem.
pub fn test_file_name(stem: &str) -> String {
    format!("{stem}{TEST_FILE_SUFFIX}.{SOURCE_EXTENSION}")
}
