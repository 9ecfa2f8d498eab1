//! Apply [`EngineOptions`] to discovered functions.

use std::collections::HashSet;

use gentests_syntax::FunctionSignature;

use super::EngineOptions;

/// Select the functions to generate tests for, preserving source order.
///
/// Patterns match the bare function name. Async and generic functions are never selected, nor are functions
/// whose test name is in `existing` or was already selected earlier in the same file.
pub fn select<'a>(
    functions: &'a [FunctionSignature],
    options: &EngineOptions,
    existing: &HashSet<String>,
) -> Vec<&'a FunctionSignature> {
    let mut seen = HashSet::new();
    let mut selected = Vec::new();

    for sig in functions {
        let name = sig.name();
        if sig.is_async || sig.is_generic {
            tracing::debug!(function = %sig.qualified_name(), "unsupported signature");
            continue;
        }
        if options.exported && !sig.exported {
            continue;
        }
        if options.only.as_ref().is_some_and(|re| !re.is_match(&name)) {
            continue;
        }
        if options.exclude.as_ref().is_some_and(|re| re.is_match(&name)) {
            continue;
        }
        let test_name = sig.test_name();
        if existing.contains(&test_name) {
            tracing::debug!(test = %test_name, "test already exists");
            continue;
        }
        if seen.insert(test_name) {
            selected.push(sig);
        }
    }

    selected
}
