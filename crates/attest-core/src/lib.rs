//! # attest-core
//!
//! The check chain execution engine: ordered, reusable verification of a
//! subject value with short-circuiting and fault containment.
//!
//! This crate provides:
//! - The [`Verify`](traits::Verify) trait, the seam verifiers compose
//!   through.
//! - [`Verifier<T>`](verifier::Verifier), the generic chain with static
//!   and per-call dynamic check registration.
//! - [`ActionVerifier`](action::ActionVerifier), the subject-less
//!   variant.
//!
//! ## Quick start
//!
//! ```rust
//! use attest_contracts::VerificationResult;
//! use attest_core::Verifier;
//!
//! let mut verifier = Verifier::<str>::new();
//! verifier
//!     .add_critical_action(|s: &str| {
//!         if s.is_empty() {
//!             Err("subject must not be empty")
//!         } else {
//!             Ok(())
//!         }
//!     })
//!     .add_check(|s: &str| {
//!         VerificationResult::normal((!s.is_ascii()).then_some("subject must be ASCII"))
//!     });
//!
//! let result = verifier.verify("hello");
//! assert!(!result.has_errors());
//! ```

pub mod action;
pub mod traits;
pub mod verifier;

pub use action::ActionVerifier;
pub use traits::Verify;
pub use verifier::{Check, DynamicHook, Verifier};
