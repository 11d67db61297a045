//! Process-wide failure hook configuration.
//!
//! The hook is the single seam between verification and a test harness:
//! every failing `check` call invokes it exactly once with the
//! newline-joined error list. Point it at the failure procedure of an
//! assertion library to surface verification errors through that library
//! instead of the default panic.
//!
//! The hook is global mutable state behind a `Mutex` with no further
//! synchronization. Callers that replace it concurrently with running
//! `check` calls must serialize externally.

use std::sync::{Arc, Mutex};

use tracing::debug;

/// The callback invoked with the newline-joined error list of a failing
/// `check` call.
pub type FailureHook = Arc<dyn Fn(&str) + Send + Sync>;

/// The configured hook. `None` until first use or after a reset; the
/// default is installed lazily by [`failure_hook`].
static FAILURE_HOOK: Mutex<Option<FailureHook>> = Mutex::new(None);

/// Replace the process-wide failure hook.
///
/// The hook cannot be absent: the signature only accepts a callable, so
/// the unset state is unrepresentable and every failing `check` call has
/// something to invoke.
pub fn set_failure_hook(hook: impl Fn(&str) + Send + Sync + 'static) {
    let mut slot = FAILURE_HOOK.lock().expect("failure hook lock poisoned");
    *slot = Some(Arc::new(hook));
    debug!("failure hook replaced");
}

/// The current failure hook, installing the default on first use.
pub fn failure_hook() -> FailureHook {
    let mut slot = FAILURE_HOOK.lock().expect("failure hook lock poisoned");
    Arc::clone(slot.get_or_insert_with(default_hook))
}

/// Restore the default hook.
pub fn reset_failure_hook() {
    let mut slot = FAILURE_HOOK.lock().expect("failure hook lock poisoned");
    *slot = None;
    debug!("failure hook reset to default");
}

/// The default hook: panic carrying the message verbatim, unless the
/// message is blank, in which case do nothing.
fn default_hook() -> FailureHook {
    Arc::new(|message: &str| {
        if !message.trim().is_empty() {
            panic!("{message}");
        }
    })
}
