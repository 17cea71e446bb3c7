//! BIP-340 Schnorr verification over secp256k1.
//!
//! Inputs arrive as hex strings straight off the wire. Every decoding or
//! library failure is reported as a [`SignatureError`]; callers that only
//! need a yes/no answer go through [`Verifier::verify_signature`](crate::Verifier::verify_signature).

use secp256k1::{schnorr, Message, Secp256k1, Verification, XOnlyPublicKey};
use thiserror::Error;

/// Errors raised while decoding or checking a signature.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// A hex field could not be decoded.
    #[error("{field} is not valid hex")]
    InvalidHex {
        /// Field that failed to decode.
        field: &'static str,
    },
    /// A decoded field has the wrong byte length.
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Field with the wrong length.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Decoded length in bytes.
        actual: usize,
    },
    /// The bytes are not a point on the curve.
    #[error("public key is not a valid x-only key")]
    InvalidPublicKey,
    /// The bytes are not a valid secret key.
    #[error("secret key is not valid")]
    InvalidSecretKey,
    /// The signature bytes are not a well-formed Schnorr signature.
    #[error("signature bytes are malformed")]
    MalformedSignature,
    /// The signature does not verify.
    #[error("verification failed: {0}")]
    Verification(#[from] secp256k1::Error),
    /// The identifier of the message to sign could not be computed.
    #[error("could not hash event: {0}")]
    EventId(#[from] notecheck_canonical::EventIdError),
}

/// Decodes exactly `N` bytes of hex.
pub(crate) fn decode_fixed<const N: usize>(
    field: &'static str,
    value: &str,
) -> Result<[u8; N], SignatureError> {
    let bytes = hex::decode(value).map_err(|_| SignatureError::InvalidHex { field })?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| SignatureError::InvalidLength {
        field,
        expected: N,
        actual,
    })
}

/// Verifies a Schnorr signature of a 32-byte message under an x-only key.
///
/// `message_hex` is the hex of the 32 message bytes themselves (an event
/// identifier, or the digest of a delegation message); it is not hashed again.
///
/// # Errors
///
/// Returns [`SignatureError`] on malformed input or when verification fails.
pub fn verify_schnorr<C: Verification>(
    secp: &Secp256k1<C>,
    signature_hex: &str,
    message_hex: &str,
    pubkey_hex: &str,
) -> Result<(), SignatureError> {
    let sig_bytes = decode_fixed::<64>("signature", signature_hex)?;
    let msg_bytes = decode_fixed::<32>("message", message_hex)?;
    let pk_bytes = decode_fixed::<32>("public key", pubkey_hex)?;

    let sig = schnorr::Signature::from_slice(&sig_bytes)
        .map_err(|_| SignatureError::MalformedSignature)?;
    let pubkey =
        XOnlyPublicKey::from_slice(&pk_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;
    let msg = Message::from_digest(msg_bytes);

    secp.verify_schnorr(&sig, &msg, &pubkey)?;
    Ok(())
}
