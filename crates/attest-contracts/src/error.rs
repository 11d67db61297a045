//! Error types for the verification engine.
//!
//! Check failures are data, not errors: they travel inside
//! [`VerificationResult`](crate::VerificationResult). The types here cover
//! the two places something error-shaped crosses an API boundary: a check
//! implementation that cannot produce a result at all ([`CheckFault`]),
//! and the aggregated failure surfaced by a `check` call
//! ([`VerificationError`]).

use thiserror::Error;

/// A check implementation faulted instead of returning a result.
///
/// Faults are absorbed by the chain: the executor converts the fault into
/// a single-message critical result and stops the current phase
/// unconditionally, so a fault never escapes `verify` as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CheckFault {
    message: String,
}

impl CheckFault {
    /// Build a fault from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wrap any displayable error, keeping only its message text.
    ///
    /// Handy as `result.map_err(CheckFault::wrap)?` inside fallible checks.
    pub fn wrap(source: impl std::fmt::Display) -> Self {
        Self::new(source.to_string())
    }

    /// The fault's message text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Aggregated verification errors surfaced by a failing `check` call.
///
/// The display output is exactly the newline-joined error list, so test
/// harnesses show the messages verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct VerificationError {
    message: String,
}

impl VerificationError {
    /// Build a verification error from the joined message list.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The joined error messages.
    pub fn message(&self) -> &str {
        &self.message
    }
}
