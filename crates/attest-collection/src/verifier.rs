//! Collection verifier: per-element checks projected into a chain.
//!
//! [`CollectionVerifier`] treats its subject as an ordered sequence and
//! its registered element checks as a list of per-position expectations:
//! element check *i* runs against element *i*. The projection happens in
//! the dynamic phase, once the concrete subject is known, so cardinality
//! mismatches become ordinary (non-critical) error messages and element
//! failures flow through the same short-circuit machinery as every other
//! check.
//!
//! The subject type is `Option<Vec<E>>`: the absent collection is a real
//! case here, guarded by an always-registered critical check.

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use tracing::debug;

use attest_contracts::{CheckFault, VerificationResult};
use attest_core::{Verifier, Verify};

/// A per-element check, shared between the persistent registration list
/// and the per-call closures that bind it to a concrete element.
type ElementCheck<E> =
    Arc<Mutex<dyn FnMut(&E) -> Result<VerificationResult, CheckFault> + Send>>;

/// An ordered, reusable verifier of `Option<Vec<E>>` subjects.
///
/// Element checks persist across calls, like static checks. On each
/// `verify` call they are bound positionally to the subject's elements;
/// if the counts disagree, a single non-critical cardinality message is
/// produced instead of the unmatched bindings.
///
/// ```rust
/// use attest_collection::CollectionVerifier;
/// use attest_contracts::VerificationResult;
///
/// let mut tags = CollectionVerifier::<String>::new();
/// tags.add_element_check(|tag: &String| {
///     VerificationResult::normal(tag.is_empty().then_some("tag is empty"))
/// });
///
/// let result = tags.verify(&Some(vec!["stable".to_string()]));
/// assert!(!result.has_errors());
/// ```
pub struct CollectionVerifier<E> {
    inner: Verifier<Option<Vec<E>>>,
    element_checks: Arc<Mutex<Vec<ElementCheck<E>>>>,
}

impl<E> CollectionVerifier<E>
where
    E: Clone + Send + 'static,
{
    /// A verifier with the non-null guard registered and no element
    /// checks yet.
    pub fn new() -> Self {
        let mut inner = Verifier::new();

        inner.add_check(|subject: &Option<Vec<E>>| {
            VerificationResult::critical(
                subject.is_none().then_some("Collection should not be null"),
            )
        });

        let element_checks: Arc<Mutex<Vec<ElementCheck<E>>>> = Arc::new(Mutex::new(Vec::new()));
        let registered = Arc::clone(&element_checks);

        // The hook binds each element check to its positional element by
        // value, so a check always sees the element it was paired with at
        // collection time.
        inner.set_dynamic_checks(move |chain, subject| {
            let Some(elements) = subject else {
                // The non-null guard already failed critically; nothing to bind.
                return;
            };

            let checks = registered.lock().expect("element check list lock poisoned");
            let expected = checks.len();
            debug!(
                expected,
                found = elements.len(),
                "binding element checks"
            );

            for (index, check) in checks.iter().enumerate() {
                if index >= elements.len() {
                    let message = format!(
                        "{expected} elements were expected, but there are only {} elements.",
                        elements.len()
                    );
                    chain.add_check(move |_| VerificationResult::normal([message.clone()]));
                    return;
                }

                let element = elements[index].clone();
                let check = Arc::clone(check);
                chain.add_fallible_check(move |_| {
                    let mut check = check.lock().expect("element check lock poisoned");
                    (*check)(&element)
                });
            }

            if elements.len() > expected {
                let message =
                    format!("{expected} elements were expected, but there are more elements.");
                chain.add_check(move |_| VerificationResult::normal([message.clone()]));
            }
        });

        Self {
            inner,
            element_checks,
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

    // ── Whole-collection checks ───────────────────────────────────────────────

    /// Append a function check against the whole collection.
    pub fn add_check(
        &mut self,
        check: impl FnMut(&Option<Vec<E>>) -> VerificationResult + Send + 'static,
    ) -> &mut Self {
        self.inner.add_check(check);
        self
    }

    /// Append a whole-collection check that may fault.
    pub fn add_fallible_check(
        &mut self,
        check: impl FnMut(&Option<Vec<E>>) -> Result<VerificationResult, CheckFault> + Send + 'static,
    ) -> &mut Self {
        self.inner.add_fallible_check(check);
        self
    }

    /// Append a whole-collection action whose failure is critical.
    pub fn add_critical_action<Failure>(
        &mut self,
        action: impl FnMut(&Option<Vec<E>>) -> Result<(), Failure> + Send + 'static,
    ) -> &mut Self
    where
        Failure: Display,
    {
        self.inner.add_critical_action(action);
        self
    }

    /// Append a whole-collection action whose failure is normal severity.
    pub fn add_normal_action<Failure>(
        &mut self,
        action: impl FnMut(&Option<Vec<E>>) -> Result<(), Failure> + Send + 'static,
    ) -> &mut Self
    where
        Failure: Display,
    {
        self.inner.add_normal_action(action);
        self
    }

    /// Append another verifier of the whole collection as a single check.
    pub fn add_verifier(
        &mut self,
        verifier: impl Verify<Option<Vec<E>>> + Send + 'static,
    ) -> &mut Self {
        self.inner.add_verifier(verifier);
        self
    }

    // ── Element checks ────────────────────────────────────────────────────────

    /// Append a function check for the element at the next position.
    pub fn add_element_check(
        &mut self,
        mut check: impl FnMut(&E) -> VerificationResult + Send + 'static,
    ) -> &mut Self {
        self.push_element(move |element: &E| Ok(check(element)))
    }

    /// Append an element check that may fault; an `Err` stops the chain
    /// unconditionally, like any other fault.
    pub fn add_fallible_element_check(
        &mut self,
        check: impl FnMut(&E) -> Result<VerificationResult, CheckFault> + Send + 'static,
    ) -> &mut Self {
        self.push_element(check)
    }

    /// Append an element action whose failure is critical and stops the
    /// chain.
    pub fn add_critical_element_action<Failure>(
        &mut self,
        mut action: impl FnMut(&E) -> Result<(), Failure> + Send + 'static,
    ) -> &mut Self
    where
        Failure: Display,
    {
        self.push_element(move |element: &E| {
            let message = action(element).err().map(|e| e.to_string());
            Ok(VerificationResult::new(true, message))
        })
    }

    /// Append an element action whose failure is normal severity.
    pub fn add_normal_element_action<Failure>(
        &mut self,
        mut action: impl FnMut(&E) -> Result<(), Failure> + Send + 'static,
    ) -> &mut Self
    where
        Failure: Display,
    {
        self.push_element(move |element: &E| {
            let message = action(element).err().map(|e| e.to_string());
            Ok(VerificationResult::new(false, message))
        })
    }

    /// Append another verifier as the check for the element at the next
    /// position.
    pub fn add_element_verifier(
        &mut self,
        mut verifier: impl Verify<E> + Send + 'static,
    ) -> &mut Self {
        self.push_element(move |element: &E| Ok(verifier.verify(element)))
    }

    fn push_element(
        &mut self,
        check: impl FnMut(&E) -> Result<VerificationResult, CheckFault> + Send + 'static,
    ) -> &mut Self {
        self.element_checks
            .lock()
            .expect("element check list lock poisoned")
            .push(Arc::new(Mutex::new(check)));
        self
    }

    // ── Execution ─────────────────────────────────────────────────────────────

    /// Run the whole-collection checks, then the positionally bound
    /// element checks, and return the cumulative result.
    pub fn verify(&mut self, subject: &Option<Vec<E>>) -> VerificationResult {
        self.inner.verify(subject)
    }
}

impl<E> Default for CollectionVerifier<E>
where
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Verify<Option<Vec<E>>> for CollectionVerifier<E>
where
    E: Clone + Send + 'static,
{
    fn verify(&mut self, subject: &Option<Vec<E>>) -> VerificationResult {
        CollectionVerifier::verify(self, subject)
    }
}
