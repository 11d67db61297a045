//! # attest-contracts
//!
//! Shared value and error types for the attest verification engine.
//!
//! All crates in the workspace import from here. No chain logic lives in
//! this crate, only the result algebra and the error types it produces:
//!
//! - [`VerificationResult`] — criticality flag + ordered error messages,
//!   with the `combine` fold used to aggregate check outcomes.
//! - [`CheckFault`] — a check implementation that faulted instead of
//!   returning a result.
//! - [`VerificationError`] — the aggregated failure surfaced by a `check`
//!   call.

pub mod error;
pub mod result;

pub use error::{CheckFault, VerificationError};
pub use result::VerificationResult;

// ── Tests ─────────────────────────────────────────────────────────────────────
