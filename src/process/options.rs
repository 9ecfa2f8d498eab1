//! Raw user options and their validation into [`EngineOptions`].

use std::fmt;

use gentests_core::messages::{EXCL_FLAG, NO_CRITERIA_MSG, ONLY_FLAG};
use regex::Regex;
use thiserror::Error;

use crate::engine::EngineOptions;

/// Raw options for one run, as supplied by the caller.
///
/// `Default` is "nothing selected": validation of a default value fails with
/// [`OptionsError::NoCriteriaSelected`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Only functions whose name matches this pattern (empty: no filter)
    pub only_funcs: String,
    /// Skip functions whose name matches this pattern (empty: no filter)
    pub excl_funcs: String,
    /// Only exported (`pub`) functions
    pub exported_funcs: bool,
    /// All functions
    pub all_funcs: bool,
    /// Print the inputs of each case in failing assertions
    pub print_inputs: bool,
    /// Write each result to its destination file instead of streaming it
    pub write_output: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only_funcs(mut self, pattern: impl Into<String>) -> Self {
        self.only_funcs = pattern.into();
        self
    }

    pub fn with_excl_funcs(mut self, pattern: impl Into<String>) -> Self {
        self.excl_funcs = pattern.into();
        self
    }

    pub fn with_exported_funcs(mut self, enabled: bool) -> Self {
        self.exported_funcs = enabled;
        self
    }

    pub fn with_all_funcs(mut self, enabled: bool) -> Self {
        self.all_funcs = enabled;
        self
    }

    pub fn with_print_inputs(mut self, enabled: bool) -> Self {
        self.print_inputs = enabled;
        self
    }

    pub fn with_write_output(mut self, enabled: bool) -> Self {
        self.write_output = enabled;
        self
    }

    /// Whether at least one selection criterion is set.
    pub fn has_criteria(&self) -> bool {
        !self.only_funcs.is_empty() || !self.excl_funcs.is_empty() || self.exported_funcs || self.all_funcs
    }
}

/// Which pattern option failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternField {
    Only,
    Exclude,
}

impl fmt::Display for PatternField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternField::Only => f.write_str(ONLY_FLAG),
            PatternField::Exclude => f.write_str(EXCL_FLAG),
        }
    }
}

/// Validation failures. Either one ends the run before any path is processed.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("{}", NO_CRITERIA_MSG)]
    NoCriteriaSelected,

    #[error("Invalid {field} regex: {}", single_line(.source))]
    InvalidPattern {
        field: PatternField,
        #[source]
        source: regex::Error,
    },
}

/// Validate `options` and compile its patterns.
///
/// The inclusion pattern is compiled before the exclusion pattern, so when both are invalid the inclusion error
/// is the one reported.
pub fn parse_options(options: &Options) -> Result<EngineOptions, OptionsError> {
    if !options.has_criteria() {
        return Err(OptionsError::NoCriteriaSelected);
    }

    let only = parse_regex(&options.only_funcs, PatternField::Only)?;
    let exclude = parse_regex(&options.excl_funcs, PatternField::Exclude)?;

    Ok(EngineOptions {
        only,
        exclude,
        exported: options.exported_funcs,
        print_inputs: options.print_inputs,
    })
}

fn parse_regex(pattern: &str, field: PatternField) -> Result<Option<Regex>, OptionsError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|source| OptionsError::InvalidPattern { field, source })
}

/// Collapse a multi-line compiler message (regex syntax errors draw a caret diagram) onto one line.
fn single_line(message: &dyn fmt::Display) -> String {
    message
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_criteria() {
        let err = parse_options(&Options::default()).unwrap_err();
        assert!(matches!(err, OptionsError::NoCriteriaSelected));
        assert_eq!(
            err.to_string(),
            "Please specify either the --only, --excl, --exported, or --all flag"
        );
    }

    #[test]
    fn test_print_and_write_are_not_criteria() {
        let options = Options::new().with_print_inputs(true).with_write_output(true);
        assert!(matches!(parse_options(&options), Err(OptionsError::NoCriteriaSelected)));
    }

    #[test]
    fn test_each_criterion_passes_the_gate() {
        for options in [
            Options::new().with_only_funcs("add"),
            Options::new().with_excl_funcs("add"),
            Options::new().with_exported_funcs(true),
            Options::new().with_all_funcs(true),
        ] {
            assert!(parse_options(&options).is_ok(), "{options:?}");
        }
    }

    #[test]
    fn test_all_maps_to_no_filters() {
        let engine = parse_options(&Options::new().with_all_funcs(true)).unwrap();
        assert!(engine.only.is_none());
        assert!(engine.exclude.is_none());
        assert!(!engine.exported);
        assert!(!engine.print_inputs);
    }

    #[test]
    fn test_patterns_and_flags_carried_over() {
        let options = Options::new()
            .with_only_funcs("^add")
            .with_excl_funcs("slow")
            .with_exported_funcs(true)
            .with_print_inputs(true);
        let engine = parse_options(&options).unwrap();
        assert!(engine.only.unwrap().is_match("add_all"));
        assert!(engine.exclude.unwrap().is_match("very_slow"));
        assert!(engine.exported);
        assert!(engine.print_inputs);
    }

    #[test]
    fn test_invalid_only_names_only() {
        let err = parse_options(&Options::new().with_only_funcs("(")).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidPattern { field: PatternField::Only, .. }));
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid --only regex: "), "{msg}");
        assert!(!msg.contains('\n'));
    }

    #[test]
    fn test_invalid_excl_names_excl() {
        let options = Options::new().with_only_funcs("ok").with_excl_funcs("[");
        let err = parse_options(&options).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidPattern { field: PatternField::Exclude, .. }));
        assert!(err.to_string().starts_with("Invalid --excl regex: "));
    }

    #[test]
    fn test_both_invalid_reports_only() {
        let options = Options::new().with_only_funcs("(").with_excl_funcs("[");
        let err = parse_options(&options).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidPattern { field: PatternField::Only, .. }));
    }

    #[test]
    fn test_single_line() {
        let message = "regex parse error:\n    (\n    ^\nerror: unclosed group";
        assert_eq!(single_line(&message), "regex parse error: ( ^ error: unclosed group");
    }
}
