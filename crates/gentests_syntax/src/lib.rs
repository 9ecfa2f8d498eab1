//! Syntax-only discovery over Rust source for gentests: function signatures and existing tests.
//!
//! This crate parses a source file with `syn` and reduces it to the facts test generation needs. It does not
//! resolve names, check types, or read files; callers hand it source text.
//!
//! ## Notes
//! - Only top-level free functions and inherent `impl` methods are discovered. Nested modules, trait impls, and
//!   anything under `#[cfg(test)]` are ignored.
//! - Naming follows `gentests_core::naming`.
//!
//! ## Examples
//! ```rust
//! use gentests_syntax::discover;
//!
//! let functions = discover::parse_functions("pub fn add(a: i32, b: i32) -> i32 { a + b }").unwrap();
//! assert_eq!(functions[0].test_name(), "test_add");
//! ```

pub mod discover;
pub mod errors;
pub mod signature;

pub use discover::{parse_functions, parse_test_names};
pub use errors::ParseError;
pub use signature::{FunctionSignature, Owner, Param, ReceiverKind, ReturnKind};
