//! Subject-less verifier for parameterless checks.
//!
//! [`ActionVerifier`] follows the same execution algorithm as
//! [`Verifier`](crate::Verifier) with the subject erased: zero-argument
//! checks, the same short-circuit rule, the same fault containment. It
//! has no dynamic layer; there is no subject to inspect.

use std::fmt::Display;

use attest_contracts::{CheckFault, VerificationResult};

use crate::verifier::Verifier;

/// An ordered, reusable chain of parameterless checks.
///
/// Useful for global assertions (environment sanity, process-wide state)
/// that do not concern any particular value.
///
/// ```rust
/// use attest_contracts::VerificationResult;
/// use attest_core::ActionVerifier;
///
/// let mut env = ActionVerifier::new();
/// env.add_check(|| {
///     let configured = std::env::var("DATABASE_URL").is_ok();
///     VerificationResult::critical((!configured).then_some("DATABASE_URL is not set"))
/// });
///
/// let result = env.verify();
/// ```
pub struct ActionVerifier {
    inner: Verifier<()>,
}

impl ActionVerifier {
    /// An empty verifier: no checks, non-critical.
    pub fn new() -> Self {
        Self {
            inner: Verifier::new(),
        }
    }

    /// Whether results returned by [`verify`](Self::verify) are stamped
    /// critical.
    pub fn is_critical(&self) -> bool {
        self.inner.is_critical()
    }

    /// Set the criticality stamped onto returned results.
    pub fn set_critical(&mut self, is_critical: bool) -> &mut Self {
        self.inner.set_critical(is_critical);
        self
    }

    /// Append a function check producing a full [`VerificationResult`].
    pub fn add_check(
        &mut self,
        mut check: impl FnMut() -> VerificationResult + Send + 'static,
    ) -> &mut Self {
        self.inner.add_check(move |_| check());
        self
    }

    /// Append a check that may fault; an `Err` stops the chain
    /// unconditionally.
    pub fn add_fallible_check(
        &mut self,
        mut check: impl FnMut() -> Result<VerificationResult, CheckFault> + Send + 'static,
    ) -> &mut Self {
        self.inner.add_fallible_check(move |_| check());
        self
    }

    /// Append an action whose failure is critical and stops the chain.
    pub fn add_critical_action<E>(
        &mut self,
        mut action: impl FnMut() -> Result<(), E> + Send + 'static,
    ) -> &mut Self
    where
        E: Display,
    {
        self.inner.add_critical_action(move |_| action());
        self
    }

    /// Append an action whose failure is normal severity.
    pub fn add_normal_action<E>(
        &mut self,
        mut action: impl FnMut() -> Result<(), E> + Send + 'static,
    ) -> &mut Self
    where
        E: Display,
    {
        self.inner.add_normal_action(move |_| action());
        self
    }

    /// Run all registered checks and return the cumulative result.
    pub fn verify(&mut self) -> VerificationResult {
        self.inner.verify(&())
    }
}

impl Default for ActionVerifier {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
