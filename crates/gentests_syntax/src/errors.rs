//! Source parse errors.

use thiserror::Error;

/// A Rust source file that `syn` could not parse.
///
/// `line` is 1-based, `column` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<syn::Error> for ParseError {
    fn from(err: syn::Error) -> Self {
        let start = err.span().start();
        Self {
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }
}
