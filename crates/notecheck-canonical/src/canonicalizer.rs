use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::event::Tag;

/// Discriminator that opens every commitment array.
const COMMITMENT_PREFIX: u8 = 0;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The commitment could not be written as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Hashable fields of an event, borrowed from an [`Event`](crate::Event) or
/// [`UnsignedEvent`](crate::UnsignedEvent).
///
/// Serializes as the positional array `[0, pubkey, created_at, kind, tags, content]`.
#[derive(Debug, Clone, Copy)]
pub struct Commitment<'a> {
    /// Author public key, hashed verbatim.
    pub pubkey: &'a str,
    /// Unix timestamp in seconds.
    pub created_at: u64,
    /// Kind number.
    pub kind: u64,
    /// Tags in wire order.
    pub tags: &'a [Tag],
    /// Content body.
    pub content: &'a str,
}

impl Serialize for Commitment<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_tuple(6)?;
        seq.serialize_element(&COMMITMENT_PREFIX)?;
        seq.serialize_element(self.pubkey)?;
        seq.serialize_element(&self.created_at)?;
        seq.serialize_element(&self.kind)?;
        seq.serialize_element(self.tags)?;
        seq.serialize_element(self.content)?;
        seq.end()
    }
}

/// Produces the canonical text of a commitment.
///
/// Compact JSON with no whitespace. Strings use the minimal JSON escapes
/// (`\"`, `\\`, `\b`, `\f`, `\n`, `\r`, `\t`, other control characters as
/// lowercase `\u00xx`) and leave all other characters as raw UTF-8, which is
/// byte-for-byte what `JSON.stringify` emits for the same array.
pub fn canonical_string(commitment: &Commitment<'_>) -> Result<String, CanonicalizationError> {
    serde_json::to_string(commitment).map_err(|e| CanonicalizationError::Serialization(e.to_string()))
}

/// Canonical UTF-8 bytes of a commitment.
pub fn canonical_bytes(commitment: &Commitment<'_>) -> Result<Vec<u8>, CanonicalizationError> {
    canonical_string(commitment).map(String::into_bytes)
}
