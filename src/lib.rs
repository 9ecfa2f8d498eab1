#![forbid(unsafe_code)]
//! gentests: table-driven unit test skeletons for Rust source files
//!
//! Given file or directory paths, gentests finds the functions in each Rust source file, selects them with
//! user-supplied filters, and generates a `#[test]` function for each. Output is either written next to the
//! source (`foo.rs` → `foo_tests.rs`) or streamed to stdout.
//!
//! ## Layout
//!
//! - [`process`] - option validation, per-path processing, and output dispatch
//! - [`engine`] - the [`engine::Generator`] contract and the default Rust engine
//! - [`cli`] - command-line surface
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli`, `process`, and
//!   `engine` modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The emitter writes `assert_eq!` calls into *generated* tests. Those are output tokens,
//!   not assertions in this crate.

pub mod cli;
pub mod engine;
pub mod process;
pub mod version;

pub use engine::{EngineError, EngineOptions, GeneratedFunction, GeneratedTest, Generator, RustTestGenerator};
pub use process::{Options, OptionsError, OutputMode, parse_options};
