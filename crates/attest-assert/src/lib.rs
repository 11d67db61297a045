//! # attest-assert
//!
//! The assertion bridge: turn a failing verification into a test failure.
//!
//! ## Overview
//!
//! This crate connects verifiers from `attest-core` to whatever failure
//! mechanism the host test harness uses:
//!
//! - [`CheckExt::check`] / [`ActionCheckExt::check`] run a verifier and,
//!   on errors, invoke the process-wide failure hook with the
//!   newline-joined error list.
//! - [`set_failure_hook`] replaces the hook (for example with the failure
//!   procedure of an assertion library); [`reset_failure_hook`] restores
//!   the default, which panics with the message.
//! - [`CheckExt::try_check`] is the hook-free `Result` flavor.
//!
//! ## Quick start
//!
//! ```rust
//! use attest_assert::CheckExt;
//! use attest_contracts::VerificationResult;
//! use attest_core::Verifier;
//!
//! let mut ports = Verifier::<u16>::new();
//! ports.add_check(|port: &u16| {
//!     VerificationResult::critical((*port < 1024).then_some("port is reserved"))
//! });
//!
//! ports.check(&8080);                       // passes, nothing happens
//! assert!(ports.try_check(&80).is_err());   // reserved, surfaces as Err
//! ```

pub mod check;
pub mod hook;

pub use check::{ActionCheckExt, CheckExt};
pub use hook::{failure_hook, reset_failure_hook, set_failure_hook, FailureHook};

// ── Tests ─────────────────────────────────────────────────────────────────────
