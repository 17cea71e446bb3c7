//! Deterministic signing helpers.
//!
//! Signatures are produced without auxiliary randomness, so the same key and
//! message always give the same signature. Used by the CLI and by tests to
//! produce fixtures that the verifiers accept.

use notecheck_canonical::{compute_event_id, Digest, Event, UnsignedEvent};
use secp256k1::{Keypair, Message, Secp256k1};

use crate::delegation::{delegation_message, DelegationToken};
use crate::signature::{decode_fixed, SignatureError};

fn keypair(secret_hex: &str) -> Result<Keypair, SignatureError> {
    let secret = decode_fixed::<32>("secret key", secret_hex)?;
    let secp = Secp256k1::signing_only();
    Keypair::from_seckey_slice(&secp, &secret).map_err(|_| SignatureError::InvalidSecretKey)
}

/// Hex x-only public key for a hex secret key.
pub fn public_key_hex(secret_hex: &str) -> Result<String, SignatureError> {
    let (xonly, _parity) = keypair(secret_hex)?.x_only_public_key();
    Ok(hex::encode(xonly.serialize()))
}

/// Signs 32 digest bytes and returns the 64-byte signature as hex.
pub fn sign_digest(secret_hex: &str, digest: &Digest) -> Result<String, SignatureError> {
    let kp = keypair(secret_hex)?;
    let secp = Secp256k1::signing_only();
    let msg = Message::from_digest(*digest.as_bytes());
    let sig = secp.sign_schnorr_no_aux_rand(&msg, &kp);
    Ok(hex::encode(sig.as_ref()))
}

/// Fills in `pubkey`, `id` and `sig` for an event template.
///
/// The template's own `pubkey` is replaced by the key derived from `secret_hex`.
pub fn sign_event(secret_hex: &str, template: &UnsignedEvent) -> Result<Event, SignatureError> {
    let mut template = template.clone();
    template.pubkey = public_key_hex(secret_hex)?;
    let id = compute_event_id(&template.commitment())?;
    let sig = sign_digest(secret_hex, &id)?;
    Ok(Event {
        id: id.to_hex(),
        pubkey: template.pubkey,
        created_at: template.created_at,
        kind: template.kind,
        tags: template.tags,
        content: template.content,
        sig,
    })
}

/// Issues a delegation token from the holder of `secret_hex` to `delegatee_pubkey`.
///
/// `conditions` is signed verbatim; it is not parsed or normalized here.
pub fn sign_delegation(
    secret_hex: &str,
    delegatee_pubkey: &str,
    conditions: &str,
) -> Result<DelegationToken, SignatureError> {
    let digest = Digest::of(delegation_message(delegatee_pubkey, conditions));
    Ok(DelegationToken {
        delegator: public_key_hex(secret_hex)?,
        conditions: conditions.to_string(),
        sig: sign_digest(secret_hex, &digest)?,
    })
}
