//! Provide the shared vocabulary of gentests: naming and file conventions plus the
//! user-facing messages.
//!
//! This crate is intentionally small and dependency-free. It holds deterministic helpers that both the syntax
//! crate and the CLI use so discovery, filtering, and reporting agree on names and wording.
//!
//! ## Notes
//!
//! - No IO and no global state.
//! - Messages in [`messages`] are matched verbatim by downstream tooling; change them with care.

pub mod conventions;
pub mod messages;
pub mod naming;
