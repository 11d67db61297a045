//! The verification result algebra.
//!
//! [`VerificationResult`] is the value every check produces: a criticality
//! flag plus an ordered list of error messages. Results are folded into a
//! cumulative outcome with [`VerificationResult::combine`], which is
//! associative and has [`VerificationResult::passed`] as identity on both
//! sides. Criticality only matters in the presence of errors: a critical
//! result with no messages is fully permissive and never stops a chain.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// The outcome of one or more checks.
///
/// Immutable once built. The message list never contains blank entries;
/// constructors drop them, so `"".into()` style placeholders cannot leak
/// into reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    is_critical: bool,
    error_messages: Vec<String>,
}

impl VerificationResult {
    /// Build a result with explicit criticality.
    ///
    /// Blank messages (empty or whitespace-only) are dropped. Passing an
    /// `Option<String>` works too, which keeps conditional checks terse:
    ///
    /// ```rust
    /// use attest_contracts::VerificationResult;
    ///
    /// let ok = true;
    /// let vr = VerificationResult::new(true, (!ok).then_some("broken"));
    /// assert!(!vr.has_errors());
    /// ```
    pub fn new<I, S>(is_critical: bool, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let error_messages = messages
            .into_iter()
            .map(Into::into)
            .filter(|m| !m.trim().is_empty())
            .collect();
        Self {
            is_critical,
            error_messages,
        }
    }

    /// A non-critical result carrying the given messages.
    pub fn normal<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(false, messages)
    }

    /// A critical result carrying the given messages.
    ///
    /// When it carries at least one message, a critical result stops the
    /// chain it belongs to.
    pub fn critical<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(true, messages)
    }

    /// The empty, non-critical result: the identity element of
    /// [`combine`](Self::combine).
    pub fn passed() -> Self {
        Self::default()
    }

    /// Whether this result, if it carries errors, must stop further checks.
    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// The accumulated error messages, in the order they were produced.
    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    /// Consume the result, yielding its messages.
    pub fn into_error_messages(self) -> Vec<String> {
        self.error_messages
    }

    /// True if at least one error message is present.
    pub fn has_errors(&self) -> bool {
        !self.error_messages.is_empty()
    }

    /// True if execution may continue past this result.
    ///
    /// Only a critical result that actually carries errors stops a chain.
    pub fn allows_continue(&self) -> bool {
        !self.has_errors() || !self.is_critical
    }

    /// Fold `other` into `self`.
    ///
    /// Messages are concatenated in order. The combined result is critical
    /// iff either operand, taken on its own, would have stopped a chain.
    pub fn combine(mut self, other: Self) -> Self {
        let is_critical = !self.allows_continue() || !other.allows_continue();
        self.error_messages.extend(other.error_messages);
        Self {
            is_critical,
            error_messages: self.error_messages,
        }
    }
}

impl From<&str> for VerificationResult {
    /// A single message becomes a normal (non-critical) result.
    fn from(message: &str) -> Self {
        Self::normal([message])
    }
}

impl From<String> for VerificationResult {
    fn from(message: String) -> Self {
        Self::normal([message])
    }
}

impl From<Vec<String>> for VerificationResult {
    /// A list of messages becomes a normal (non-critical) result.
    fn from(messages: Vec<String>) -> Self {
        Self::normal(messages)
    }
}

impl Add for VerificationResult {
    type Output = VerificationResult;

    /// Operator form of [`VerificationResult::combine`].
    fn add(self, other: Self) -> Self {
        self.combine(other)
    }
}

impl FromIterator<VerificationResult> for VerificationResult {
    /// Fold a sequence of results through [`VerificationResult::combine`],
    /// starting from [`VerificationResult::passed`].
    fn from_iter<I: IntoIterator<Item = VerificationResult>>(iter: I) -> Self {
        iter.into_iter()
            .fold(VerificationResult::passed(), VerificationResult::combine)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::VerificationResult;

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn default_is_permissive() {
        let vr = VerificationResult::default();
        assert!(!vr.is_critical());
        assert!(vr.error_messages().is_empty());
        assert!(vr.allows_continue());
    }

    #[test]
    fn normal_constructor() {
        let vr = VerificationResult::normal(["error"]);
        assert!(!vr.is_critical());
        assert_eq!(vr.error_messages(), ["error"]);
    }

    #[test]
    fn critical_constructor() {
        let vr = VerificationResult::critical(["error"]);
        assert!(vr.is_critical());
        assert_eq!(vr.error_messages(), ["error"]);
    }

    /// Blank and whitespace-only messages never reach the stored list.
    #[test]
    fn blank_messages_are_dropped() {
        let vr = VerificationResult::normal(["", "   ", "real error", "\t"]);
        assert_eq!(vr.error_messages(), ["real error"]);
    }

    /// `Option<&str>` is accepted directly, so conditional messages need no
    /// intermediate Vec.
    #[test]
    fn option_message_is_accepted() {
        let vr = VerificationResult::critical(Some("broken"));
        assert_eq!(vr.error_messages(), ["broken"]);

        let vr = VerificationResult::critical(None::<&str>);
        assert!(!vr.has_errors());
        assert!(vr.allows_continue());
    }

    #[test]
    fn convert_from_str() {
        let vr = VerificationResult::from("error");
        assert!(!vr.is_critical());
        assert_eq!(vr.error_messages(), ["error"]);
    }

    #[test]
    fn convert_from_string_vec() {
        let vr = VerificationResult::from(vec!["error1".to_string(), "error2".to_string()]);
        assert!(!vr.is_critical());
        assert_eq!(vr.error_messages(), ["error1", "error2"]);
    }

    // ── has_errors / allows_continue ──────────────────────────────────────────

    #[test]
    fn has_errors_reflects_message_presence() {
        assert!(VerificationResult::normal(["error"]).has_errors());
        assert!(!VerificationResult::normal(None::<&str>).has_errors());
    }

    /// A critical result with no messages is fully permissive.
    #[test]
    fn critical_without_errors_allows_continue() {
        assert!(VerificationResult::critical(None::<&str>).allows_continue());
        assert!(!VerificationResult::critical(["error"]).allows_continue());
        assert!(VerificationResult::normal(["error"]).allows_continue());
    }

    // ── combine ───────────────────────────────────────────────────────────────

    /// The full criticality matrix: the combined result is critical iff
    /// either operand carries errors AND is critical.
    #[test]
    fn combine_criticality_matrix() {
        // (critical1, message1, critical2, message2, expected_critical)
        let cases: &[(bool, Option<&str>, bool, Option<&str>, bool)] = &[
            (false, Some("error1"), false, Some("error2"), false),
            (true, Some("error1"), false, Some("error2"), true),
            (false, Some("error1"), true, Some("error2"), true),
            (true, Some("error1"), true, Some("error2"), true),
            (false, None, false, Some("error2"), false),
            (false, Some("error1"), false, None, false),
            (false, None, false, None, false),
            (true, Some("error1"), false, None, true),
            (true, None, false, Some("error2"), false),
            (true, None, false, None, false),
            (false, Some("error1"), true, None, false),
            (false, None, true, Some("error2"), true),
            (false, None, true, None, false),
            (true, Some("error1"), true, None, true),
            (true, None, true, Some("error2"), true),
            (true, None, true, None, false),
        ];

        for &(critical1, message1, critical2, message2, expected_critical) in cases {
            let vr1 = VerificationResult::new(critical1, message1);
            let vr2 = VerificationResult::new(critical2, message2);

            let combined = vr1 + vr2;

            assert_eq!(
                combined.is_critical(),
                expected_critical,
                "case ({critical1}, {message1:?}, {critical2}, {message2:?})"
            );
            let expected_messages: Vec<&str> =
                [message1, message2].into_iter().flatten().collect();
            assert_eq!(
                combined.error_messages(),
                expected_messages.as_slice(),
                "case ({critical1}, {message1:?}, {critical2}, {message2:?})"
            );
        }
    }

    /// `passed()` is a two-sided identity for `combine`.
    #[test]
    fn combine_identity() {
        let vr = VerificationResult::critical(["error"]);

        assert_eq!(VerificationResult::passed().combine(vr.clone()), vr);
        assert_eq!(vr.clone().combine(VerificationResult::passed()), vr);
    }

    /// `combine` is associative for results with disjoint message lists.
    #[test]
    fn combine_associativity() {
        let a = VerificationResult::normal(["a"]);
        let b = VerificationResult::critical(["b"]);
        let c = VerificationResult::normal(["c"]);

        let left = a.clone().combine(b.clone()).combine(c.clone());
        let right = a.combine(b.combine(c));

        assert_eq!(left, right);
    }

    /// Collecting an iterator of results folds them in order.
    #[test]
    fn collect_folds_in_order() {
        let vr: VerificationResult = [
            VerificationResult::normal(["error1"]),
            VerificationResult::critical(["error2"]),
            VerificationResult::normal(["error3"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(vr.error_messages(), ["error1", "error2", "error3"]);
        assert!(vr.is_critical());
    }

    // ── Serde ─────────────────────────────────────────────────────────────────

    #[test]
    fn result_round_trips_through_json() {
        let original = VerificationResult::critical(["first", "second"]);
        let json = serde_json::to_string(&original).unwrap();
        let decoded: VerificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }
}
