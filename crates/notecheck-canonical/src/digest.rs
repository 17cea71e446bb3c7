use sha2::{Digest as Sha2Digest, Sha256};

use crate::validation::ValidationError;

/// A 32-byte SHA-256 digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Hashes `data` with SHA-256.
    pub fn of(data: impl AsRef<[u8]>) -> Self {
        Self(Sha256::digest(data.as_ref()).into())
    }

    /// Parses a 64-character hex digest.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(value, &mut bytes).map_err(|_| ValidationError::PatternMismatch {
            field: "digest",
            value: value.to_string(),
        })?;
        Ok(Self(bytes))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// SHA-256 of `data` as 64 lowercase hex characters.
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    Digest::of(data).to_hex()
}
