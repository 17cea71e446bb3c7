//! Verification of Nostr events and delegation tokens.
//!
//! This crate provides:
//! - Identity verification: an event's id is the SHA-256 of its canonical form
//! - BIP-340 Schnorr signature verification of the id under the author key
//! - Delegation grammar parsing and enforcement
//! - Optional field-shape checks and deterministic signing helpers
//!
//! Core invariants:
//! - Verification is pure: no I/O, no shared mutable state, no retries
//! - Malformed input never panics; it ends in a [`Rejection`]
//! - The first failing stage determines the rejection reason
//!
#![deny(missing_docs)]

/// Delegation tokens, condition grammar and constraints.
pub mod delegation;
/// Rejection reasons.
pub mod errors;
/// Field-shape checks and limits.
pub mod shape;
/// Schnorr signature verification.
pub mod signature;
/// Deterministic signing helpers.
pub mod signing;
/// The event verifier.
pub mod verifier;

pub use delegation::{
    parse_conditions, Clause, DelegationConstraints, DelegationToken, GrammarError,
};
pub use errors::{ConstraintViolation, Rejection};
pub use shape::{Filter, Limits, ShapeError};
pub use signature::SignatureError;
pub use verifier::{Acceptance, Verifier};
