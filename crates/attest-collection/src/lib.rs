//! # attest-collection
//!
//! Per-element verification of ordered collections.
//!
//! ## Overview
//!
//! This crate provides [`CollectionVerifier`], which extends the chain
//! machinery from `attest-core` over subjects of type `Option<Vec<E>>`.
//! Registered element checks are bound positionally to the subject's
//! elements on every `verify` call: check *i* always runs against element
//! *i*. Count mismatches surface as ordinary non-critical error messages;
//! an absent (`None`) collection fails a built-in critical guard before
//! any element work happens.
//!
//! ## Quick start
//!
//! ```rust
//! use attest_collection::CollectionVerifier;
//! use attest_contracts::CheckFault;
//!
//! let mut headers = CollectionVerifier::<String>::new();
//! headers
//!     .add_normal_element_action(|h: &String| {
//!         if h.as_str() == "content-type" {
//!             Ok(())
//!         } else {
//!             Err(CheckFault::new("first header should be content-type"))
//!         }
//!     })
//!     .add_normal_element_action(|h: &String| {
//!         if h.as_str() == "content-length" {
//!             Ok(())
//!         } else {
//!             Err(CheckFault::new("second header should be content-length"))
//!         }
//!     });
//!
//! let subject = Some(vec!["content-type".to_string(), "content-length".to_string()]);
//! assert!(!headers.verify(&subject).has_errors());
//! ```

pub mod verifier;

pub use verifier::CollectionVerifier;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use attest_contracts::{CheckFault, VerificationResult};
    use attest_core::Verifier;

    use super::CollectionVerifier;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// An element action failing unless the element starts with `prefix`.
    fn starts_with(prefix: char) -> impl FnMut(&String) -> Result<(), CheckFault> {
        move |element: &String| {
            if element.starts_with(prefix) {
                Ok(())
            } else {
                Err(CheckFault::new(format!(
                    "'{element}' should start with '{prefix}'"
                )))
            }
        }
    }

    fn strings(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    // ── Null guard ────────────────────────────────────────────────────────────

    /// An absent collection fails the built-in guard and nothing else runs.
    #[test]
    fn null_collection_produces_single_error() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_normal_element_action(starts_with('a'));
        verifier.add_normal_element_action(starts_with('b'));

        let vr = verifier.verify(&None);

        assert_eq!(vr.error_messages(), ["Collection should not be null"]);
    }

    // ── Cardinality ───────────────────────────────────────────────────────────

    #[test]
    fn collection_contains_fewer_elements_than_expected() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_normal_element_action(starts_with('a'));
        verifier.add_normal_element_action(starts_with('b'));

        let vr = verifier.verify(&strings(&["aaa"]));

        assert_eq!(
            vr.error_messages(),
            ["2 elements were expected, but there are only 1 elements."]
        );
    }

    #[test]
    fn collection_contains_more_elements_than_expected() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_normal_element_action(starts_with('a'));
        verifier.add_normal_element_action(starts_with('b'));

        let vr = verifier.verify(&strings(&["aaa", "bbb", "ccc"]));

        assert_eq!(
            vr.error_messages(),
            ["2 elements were expected, but there are more elements."]
        );
    }

    /// Cardinality messages are normal severity, so a failing
    /// whole-collection check earlier in the chain still reports.
    #[test]
    fn cardinality_message_follows_whole_collection_errors() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_check(|_| VerificationResult::normal(["collection is unsorted"]));
        verifier.add_normal_element_action(starts_with('a'));
        verifier.add_normal_element_action(starts_with('b'));

        let vr = verifier.verify(&strings(&["aaa"]));

        assert_eq!(
            vr.error_messages(),
            [
                "collection is unsorted",
                "2 elements were expected, but there are only 1 elements."
            ]
        );
    }

    // ── Positional binding ────────────────────────────────────────────────────

    /// Check *i* binds to element *i*: swapped elements fail both checks.
    #[test]
    fn element_checks_bind_positionally() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_normal_element_action(starts_with('a'));
        verifier.add_normal_element_action(starts_with('b'));

        let vr = verifier.verify(&strings(&["bbb", "aaa"]));

        assert_eq!(vr.error_messages().len(), 2);
    }

    /// Element checks persist: the same verifier accepts a matching
    /// subject on the next call.
    #[test]
    fn element_checks_are_reusable() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_normal_element_action(starts_with('a'));
        verifier.add_normal_element_action(starts_with('b'));

        let vr = verifier.verify(&strings(&["bbb", "aaa"]));
        assert_eq!(vr.error_messages().len(), 2);

        let vr = verifier.verify(&strings(&["aaa", "bbb"]));
        assert!(vr.error_messages().is_empty());
    }

    // ── Registration flavors ──────────────────────────────────────────────────

    #[test]
    fn element_function_checks() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_element_check(|element: &String| {
            VerificationResult::normal(
                (!element.starts_with('a')).then_some("String should start with 'a'"),
            )
        });
        verifier.add_element_check(|element: &String| {
            VerificationResult::normal(
                (!element.starts_with('b')).then_some("String should start with 'b'"),
            )
        });

        let vr = verifier.verify(&strings(&["bbb", "aaa"]));

        assert_eq!(
            vr.error_messages(),
            ["String should start with 'a'", "String should start with 'b'"]
        );
    }

    /// The first failing critical element check stops the chain; the
    /// second positional failure is never reported.
    #[test]
    fn critical_element_checks_stop_chain() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_critical_element_action(starts_with('a'));
        verifier.add_critical_element_action(starts_with('b'));

        let vr = verifier.verify(&strings(&["bbb", "aaa"]));

        assert_eq!(vr.error_messages().len(), 1);
    }

    /// A faulting element check aborts the chain like any other fault.
    #[test]
    fn faulting_element_check_stops_chain() {
        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_fallible_element_check(|_| Err(CheckFault::new("boom")));
        verifier.add_normal_element_action(starts_with('b'));

        let vr = verifier.verify(&strings(&["aaa", "aaa"]));

        assert_eq!(vr.error_messages(), ["boom"]);
    }

    /// Whole verifiers can serve as element checks.
    #[test]
    fn element_sub_verifiers() {
        let mut first = Verifier::<String>::new();
        first.add_normal_action(starts_with('a'));
        let mut second = Verifier::<String>::new();
        second.add_normal_action(starts_with('b'));

        let mut verifier = CollectionVerifier::<String>::new();
        verifier.add_element_verifier(first);
        verifier.add_element_verifier(second);

        let vr = verifier.verify(&strings(&["bbb", "aaa"]));
        assert_eq!(vr.error_messages().len(), 2);

        let vr = verifier.verify(&strings(&["aaa", "bbb"]));
        assert!(vr.error_messages().is_empty());
    }
}
