//! Shared user-facing messages.
//!
//! These are printed on the output sink, one per line. Tooling greps for some of them (notably
//! [`GENERATED_PREFIX`]), so the wording is part of the interface.

/// Printed when no selection criterion was given.
pub const NO_CRITERIA_MSG: &str = "Please specify either the --only, --excl, --exported, or --all flag";

/// Printed when the path list is empty.
pub const MISSING_PATHS_MSG: &str = "Please specify a file or directory containing the source";

/// Prefix of the per-path empty-result notice (`No tests generated for <path>`).
pub const NO_TESTS_PREFIX: &str = "No tests generated for";

/// Prefix of the per-function report line (`Generated <test name>`).
pub const GENERATED_PREFIX: &str = "Generated";

/// Flag name of the inclusion pattern.
pub const ONLY_FLAG: &str = "--only";

/// Flag name of the exclusion pattern.
pub const EXCL_FLAG: &str = "--excl";
