//! The generic verifier chain.
//!
//! A [`Verifier`] owns an ordered list of checks against a subject value
//! and executes them sequentially, folding each check's
//! [`VerificationResult`] into a cumulative outcome. Execution stops at
//! the first result that does not allow continuation and at the first
//! faulting check.
//!
//! Checks come in two tiers. Static checks are registered once and rerun
//! on every `verify` call. Dynamic checks are produced per call by the
//! hook installed with [`Verifier::set_dynamic_checks`], which inspects
//! the concrete subject before execution; they are discarded when the
//! call returns and never leak into the next one.

use std::fmt::Display;
use std::mem;

use tracing::{debug, warn};

use attest_contracts::{CheckFault, VerificationResult};

use crate::traits::Verify;

/// A single executable check, boxed into a chain.
///
/// The `Err` arm is the fault signal: it aborts the current phase
/// unconditionally, regardless of any declared severity and even when the
/// fault message is blank.
pub type Check<T> = Box<dyn FnMut(&T) -> Result<VerificationResult, CheckFault> + Send>;

/// The hook invoked once per `verify` call to register dynamic checks.
///
/// Receives the verifier itself (with the registration target switched to
/// the per-call dynamic list) and the subject under verification.
pub type DynamicHook<T> = Box<dyn FnMut(&mut Verifier<T>, &T) + Send>;

/// Where `add_*` calls currently append their checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Static,
    Dynamic,
}

/// Outcome of executing one check list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stopped,
}

/// An ordered, reusable chain of checks against subjects of type `T`.
///
/// `T` may be unsized, so verifiers over `str` or slices work directly.
///
/// ```rust
/// use attest_contracts::VerificationResult;
/// use attest_core::Verifier;
///
/// let mut names = Verifier::<str>::new();
/// names.add_check(|name: &str| {
///     VerificationResult::normal(name.is_empty().then_some("name is empty"))
/// });
///
/// assert!(!names.verify("order-service").has_errors());
/// assert!(names.verify("").has_errors());
/// ```
pub struct Verifier<T: ?Sized> {
    static_checks: Vec<Check<T>>,
    dynamic_checks: Vec<Check<T>>,
    dynamic_hook: Option<DynamicHook<T>>,
    target: Target,
    is_critical: bool,
}

impl<T: ?Sized> Verifier<T> {
    /// An empty verifier: no checks, no hook, non-critical.
    pub fn new() -> Self {
        Self {
            static_checks: Vec::new(),
            dynamic_checks: Vec::new(),
            dynamic_hook: None,
            target: Target::Static,
            is_critical: false,
        }
    }

    /// Whether results returned by [`verify`](Self::verify) are stamped
    /// critical.
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Set the criticality stamped onto returned results.
    ///
    /// This flag never influences short-circuiting while the chain runs;
    /// it only matters when this verifier is nested inside another one via
    /// [`add_verifier`](Self::add_verifier), where a critical failing
    /// sub-result stops the outer chain.
    pub fn set_critical(&mut self, is_critical: bool) -> &mut Self {
        self.is_critical = is_critical;
        self
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Append a function check producing a full [`VerificationResult`].
    pub fn add_check(
        &mut self,
        mut check: impl FnMut(&T) -> VerificationResult + Send + 'static,
    ) -> &mut Self {
        self.push(Box::new(move |subject: &T| Ok(check(subject))));
        self
    }

    /// Append a check that may fault.
    ///
    /// An `Err` from the check is converted into a single-message critical
    /// result and stops the current phase unconditionally.
    pub fn add_fallible_check(
        &mut self,
        check: impl FnMut(&T) -> Result<VerificationResult, CheckFault> + Send + 'static,
    ) -> &mut Self {
        self.push(Box::new(check));
        self
    }

    /// Append an action whose failure is critical.
    ///
    /// `Ok(())` yields an empty critical result, which passes. `Err(e)`
    /// yields a critical result carrying `e`'s message as its single
    /// error, which stops the chain.
    pub fn add_critical_action<E>(
        &mut self,
        mut action: impl FnMut(&T) -> Result<(), E> + Send + 'static,
    ) -> &mut Self
    where
        E: Display,
    {
        self.push(Box::new(move |subject: &T| {
            let message = action(subject).err().map(|e| e.to_string());
            Ok(VerificationResult::new(true, message))
        }));
        self
    }

    /// Append an action whose failure is normal severity.
    ///
    /// Like [`add_critical_action`](Self::add_critical_action), but a
    /// failure does not stop the chain.
    pub fn add_normal_action<E>(
        &mut self,
        mut action: impl FnMut(&T) -> Result<(), E> + Send + 'static,
    ) -> &mut Self
    where
        E: Display,
    {
        self.push(Box::new(move |subject: &T| {
            let message = action(subject).err().map(|e| e.to_string());
            Ok(VerificationResult::new(false, message))
        }));
        self
    }

    /// Append another verifier as a single check.
    ///
    /// The sub-verifier's `verify` result is folded like any other check
    /// result, so a critical sub-verifier that fails stops this chain.
    pub fn add_verifier(&mut self, mut verifier: impl Verify<T> + Send + 'static) -> &mut Self {
        self.push(Box::new(move |subject: &T| Ok(verifier.verify(subject))));
        self
    }

    /// Install the dynamic-checks hook.
    ///
    /// The hook runs once per [`verify`](Self::verify) call, after the
    /// static phase passes, and may call any `add_*` method; those
    /// registrations land in a per-call list that is discarded when the
    /// call returns. Installing a new hook replaces the previous one.
    pub fn set_dynamic_checks(
        &mut self,
        hook: impl FnMut(&mut Verifier<T>, &T) + Send + 'static,
    ) -> &mut Self {
        self.dynamic_hook = Some(Box::new(hook));
        self
    }

    fn push(&mut self, check: Check<T>) {
        match self.target {
            Target::Static => self.static_checks.push(check),
            Target::Dynamic => self.dynamic_checks.push(check),
        }
    }

    // ── Execution ─────────────────────────────────────────────────────────────

    /// Run all registered checks against `subject` and return the
    /// cumulative result.
    ///
    /// The static list runs first, in registration order. If it completes
    /// without a stop, the dynamic hook is invoked and the resulting
    /// per-call list runs under the same rules. The returned result
    /// carries the aggregated messages and this verifier's own
    /// criticality flag; per-check criticality only controls
    /// short-circuiting during execution.
    pub fn verify(&mut self, subject: &T) -> VerificationResult {
        debug!(
            static_checks = self.static_checks.len(),
            "verification started"
        );

        // Drop anything a panicking hook may have left behind.
        self.dynamic_checks.clear();

        let (mut aggregate, flow) = run_checks(&mut self.static_checks, subject);

        if flow == Flow::Continue {
            self.collect_dynamic_checks(subject);
            // The dynamic list lives for exactly one call.
            let mut dynamic = mem::take(&mut self.dynamic_checks);
            debug!(dynamic_checks = dynamic.len(), "running dynamic checks");
            let (dynamic_result, _) = run_checks(&mut dynamic, subject);
            aggregate = aggregate.combine(dynamic_result);
        }

        let result = VerificationResult::new(self.is_critical, aggregate.into_error_messages());
        debug!(
            errors = result.error_messages().len(),
            is_critical = result.is_critical(),
            "verification finished"
        );
        result
    }

    /// Switch registration to the dynamic list for the duration of the
    /// hook call. The switch-back is unconditional: a guard restores the
    /// static target even if the hook panics.
    fn collect_dynamic_checks(&mut self, subject: &T) {
        let Some(mut hook) = self.dynamic_hook.take() else {
            return;
        };

        self.target = Target::Dynamic;
        {
            let mut guard = TargetGuard { verifier: self };
            hook(&mut *guard.verifier, subject);
        }

        // A hook installed during the call wins over the one taken out.
        if self.dynamic_hook.is_none() {
            self.dynamic_hook = Some(hook);
        }
    }
}

impl<T: ?Sized> Default for Verifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Verify<T> for Verifier<T> {
    fn verify(&mut self, subject: &T) -> VerificationResult {
        Verifier::verify(self, subject)
    }
}

/// Restores the static registration target on drop.
struct TargetGuard<'a, T: ?Sized> {
    verifier: &'a mut Verifier<T>,
}

impl<T: ?Sized> Drop for TargetGuard<'_, T> {
    fn drop(&mut self) {
        self.verifier.target = Target::Static;
    }
}

/// Execute one check list, folding each outcome into an aggregate.
///
/// Returns `Flow::Stopped` when a check's own result does not allow
/// continuation or when a check faults; the caller uses this to skip the
/// dynamic phase.
fn run_checks<T: ?Sized>(checks: &mut [Check<T>], subject: &T) -> (VerificationResult, Flow) {
    let mut aggregate = VerificationResult::passed();

    for check in checks.iter_mut() {
        match check(subject) {
            Ok(result) => {
                let stop = !result.allows_continue();
                aggregate = aggregate.combine(result);
                if stop {
                    debug!("critical check failed; stopping chain");
                    return (aggregate, Flow::Stopped);
                }
            }
            Err(fault) => {
                warn!(message = %fault, "check faulted; stopping chain");
                aggregate = aggregate.combine(VerificationResult::critical([fault.message()]));
                return (aggregate, Flow::Stopped);
            }
        }
    }

    (aggregate, Flow::Continue)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
