use serde::{Deserialize, Serialize};

use crate::canonicalizer::Commitment;

/// Ordered list of strings attached to an event.
///
/// The first element names the tag and the rest carry its values, e.g.
/// `["p", "<pubkey>"]` or `["delegation", "<delegator>", "<conditions>", "<sig>"]`.
/// Tags are kept verbatim so unknown tags hash exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub Vec<String>);

impl Tag {
    /// Builds a tag from anything string-like.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Tag name (first element), if any.
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Values following the name.
    pub fn values(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }
}

/// Signed Nostr event as received from the wire.
///
/// ```json
/// {
///   "id": "<64 hex>",
///   "pubkey": "<64 hex>",
///   "created_at": 1700000000,
///   "kind": 1,
///   "tags": [["t", "news"]],
///   "content": "hello",
///   "sig": "<128 hex>"
/// }
/// ```
///
/// Fields are kept as plain strings: the verifiers must reject malformed hex
/// rather than fail to deserialize it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Claimed identifier (hex of the SHA-256 of the canonical form).
    pub id: String,
    /// Author x-only public key (hex).
    pub pubkey: String,
    /// Unix timestamp in seconds.
    pub created_at: u64,
    /// Kind number.
    pub kind: u64,
    /// Tags in wire order.
    pub tags: Vec<Tag>,
    /// Content body.
    pub content: String,
    /// Schnorr signature over the identifier (hex).
    pub sig: String,
}

impl Event {
    /// Borrowed view of the hashable fields.
    pub fn commitment(&self) -> Commitment<'_> {
        Commitment {
            pubkey: &self.pubkey,
            created_at: self.created_at,
            kind: self.kind,
            tags: &self.tags,
            content: &self.content,
        }
    }

    /// First tag with the given name.
    pub fn find_tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name() == Some(name))
    }
}

/// Event template before an identifier and signature are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedEvent {
    /// Author x-only public key (hex). Signing fills it in from the key.
    #[serde(default)]
    pub pubkey: String,
    /// Unix timestamp in seconds.
    pub created_at: u64,
    /// Kind number.
    pub kind: u64,
    /// Tags in wire order.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Content body.
    #[serde(default)]
    pub content: String,
}

impl UnsignedEvent {
    /// Borrowed view of the hashable fields.
    pub fn commitment(&self) -> Commitment<'_> {
        Commitment {
            pubkey: &self.pubkey,
            created_at: self.created_at,
            kind: self.kind,
            tags: &self.tags,
            content: &self.content,
        }
    }
}
