//! Assertion entry points: verify, then surface errors.
//!
//! `check` runs a verifier and, when the aggregated result carries
//! errors, hands the newline-joined message list to the process-wide
//! failure hook. `try_check` is the `Result` flavor: it returns a
//! [`VerificationError`] instead of touching the hook, for callers that
//! prefer `?` plumbing over panics.

use tracing::debug;

use attest_contracts::{VerificationError, VerificationResult};
use attest_core::{ActionVerifier, Verify};

use crate::hook::failure_hook;

/// Joined the way the failure hook and `VerificationError` expect it.
fn joined(result: &VerificationResult) -> String {
    result.error_messages().join("\n")
}

fn report(result: &VerificationResult) {
    if result.has_errors() {
        debug!(
            errors = result.error_messages().len(),
            "verification failed; invoking failure hook"
        );
        (failure_hook())(&joined(result));
    }
}

fn to_outcome(result: &VerificationResult) -> Result<(), VerificationError> {
    if result.has_errors() {
        Err(VerificationError::new(joined(result)))
    } else {
        Ok(())
    }
}

/// Assertion entry points for subject verifiers.
///
/// Blanket-implemented for every [`Verify`] implementor, so any verifier
/// (including nested and collection verifiers) gains `check` and
/// `try_check` by importing this trait.
pub trait CheckExt<T: ?Sized>: Verify<T> {
    /// Verify `subject`; on errors, invoke the failure hook with the
    /// newline-joined message list.
    fn check(&mut self, subject: &T) {
        report(&self.verify(subject));
    }

    /// Verify `subject`; on errors, return a [`VerificationError`]
    /// carrying the newline-joined message list. The failure hook is not
    /// involved.
    fn try_check(&mut self, subject: &T) -> Result<(), VerificationError> {
        to_outcome(&self.verify(subject))
    }
}

impl<T: ?Sized, V: Verify<T>> CheckExt<T> for V {}

/// Assertion entry points for the subject-less [`ActionVerifier`].
pub trait ActionCheckExt {
    /// Verify; on errors, invoke the failure hook with the newline-joined
    /// message list.
    fn check(&mut self);

    /// Verify; on errors, return a [`VerificationError`] carrying the
    /// newline-joined message list.
    fn try_check(&mut self) -> Result<(), VerificationError>;
}

impl ActionCheckExt for ActionVerifier {
    fn check(&mut self) {
        report(&self.verify());
    }

    fn try_check(&mut self) -> Result<(), VerificationError> {
        to_outcome(&self.verify())
    }
}
