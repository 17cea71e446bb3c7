//! Canonical data model primitives for Nostr events.
//!
//! Every field that participates in hashing lives in this crate, together with
//! the canonical serializer and the content hasher that derive an event's
//! identifier. Nothing here touches keys or signatures.
//!
#![deny(missing_docs)]

/// Canonical serialization of an event's hashable fields.
pub mod canonicalizer;
/// SHA-256 digest primitives.
pub mod digest;
/// Event identifier computation and verification.
pub mod event_id;
/// Event and tag types.
pub mod event;
/// Hex identifier newtypes checked against the wire patterns.
pub mod identifiers;
/// Validation errors shared by the identifier newtypes.
pub mod validation;

pub use canonicalizer::{canonical_bytes, canonical_string, CanonicalizationError, Commitment};
pub use digest::{sha256_hex, Digest};
pub use event::{Event, Tag, UnsignedEvent};
pub use event_id::{compute_event_id, verify_event_id, EventIdError};
pub use identifiers::{EventIdHex, IdPrefix, PublicKeyHex, SignatureHex};
pub use validation::ValidationError;
