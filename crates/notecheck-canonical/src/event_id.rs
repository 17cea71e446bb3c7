//! Event identifier computation.
//!
//! An identifier is `sha256(canonical_bytes([0, pubkey, created_at, kind, tags, content]))`
//! rendered as lowercase hex. There is no domain separator: the leading `0`
//! in the commitment array plays that role.

use crate::{canonical_bytes, CanonicalizationError, Commitment, Digest, Event};

/// Computes the identifier for a set of hashable fields.
///
/// # Example
///
/// ```rust
/// use notecheck_canonical::{compute_event_id, Tag, UnsignedEvent};
///
/// let template = UnsignedEvent {
///     pubkey: "a".repeat(64),
///     created_at: 1_700_000_000,
///     kind: 1,
///     tags: vec![Tag::new(["t", "news"])],
///     content: "hello".into(),
/// };
///
/// let id = compute_event_id(&template.commitment())?;
/// assert_eq!(id.to_hex().len(), 64);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`EventIdError`] if canonicalization fails.
pub fn compute_event_id(commitment: &Commitment<'_>) -> Result<Digest, EventIdError> {
    let bytes = canonical_bytes(commitment)?;
    Ok(Digest::of(bytes))
}

/// Error during identifier computation.
#[derive(thiserror::Error, Debug)]
pub enum EventIdError {
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Checks that `event.id` equals the identifier recomputed from its fields.
///
/// The comparison is case-sensitive against lowercase hex, so an uppercase
/// claimed identifier never matches.
///
/// # Errors
///
/// Returns [`EventIdError`] if computation fails.
pub fn verify_event_id(event: &Event) -> Result<bool, EventIdError> {
    let computed = compute_event_id(&event.commitment())?;
    Ok(event.id == computed.to_hex())
}
