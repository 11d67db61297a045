//! Core trait definition for the verification engine.
//!
//! `Verify` is the seam everything composes through: concrete verifiers
//! implement it, and the chain adapts any implementor into a check via
//! `add_verifier`, so rule sets nest arbitrarily deep.

use attest_contracts::VerificationResult;

/// A reusable verifier of subjects of type `T`.
///
/// `verify` takes `&mut self` because a running verifier mutates per-call
/// state (the transient dynamic check list). The exclusive borrow is also
/// the non-reentrancy contract: at most one in-flight `verify` per
/// instance, enforced at compile time rather than documented away.
pub trait Verify<T: ?Sized> {
    /// Run all registered checks against `subject` and return the
    /// cumulative result.
    ///
    /// Never fails for check-level reasons: check failures and faults are
    /// folded into the returned [`VerificationResult`] as data.
    fn verify(&mut self, subject: &T) -> VerificationResult;
}
