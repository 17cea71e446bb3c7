use notecheck_canonical::{sha256_hex, verify_event_id, Event};
use secp256k1::{Secp256k1, VerifyOnly};
use serde::{Deserialize, Serialize};

use crate::delegation::{
    delegation_message, parse_conditions, DelegationConstraints, DelegationToken, DELEGATION_TAG,
};
use crate::errors::Rejection;
use crate::shape::{self, Limits};
use crate::signature::verify_schnorr;

/// An event that passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    /// Verified identifier.
    pub id: String,
    /// Key that signed the event.
    pub signer: String,
    /// Delegator the event speaks for, when a delegation tag was verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegator: Option<String>,
    /// Constraints of the verified delegation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<DelegationConstraints>,
}

impl Acceptance {
    /// The key the event should be attributed to: the delegator if present,
    /// otherwise the signer.
    pub fn effective_author(&self) -> &str {
        self.delegator.as_deref().unwrap_or(&self.signer)
    }
}

/// Stateless event verifier.
///
/// Holds a verification-only secp256k1 context built once. The verifier is
/// `Send + Sync`; share one instance by reference across threads.
#[derive(Debug, Clone)]
pub struct Verifier {
    secp: Secp256k1<VerifyOnly>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Verifier {
    /// Creates a verifier.
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }

    /// `true` when `event.id` is the hash of the event's canonical form.
    ///
    /// Serialization failures count as a mismatch.
    pub fn verify_identity(&self, event: &Event) -> bool {
        match verify_event_id(event) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!(event_id = %event.id, error = %e, "could not hash event");
                false
            }
        }
    }

    /// `true` when `signature_hex` is a valid Schnorr signature of the 32
    /// bytes in `message_hex` under `pubkey_hex`.
    ///
    /// Malformed hex and wrong lengths count as an invalid signature.
    pub fn verify_signature(&self, signature_hex: &str, message_hex: &str, pubkey_hex: &str) -> bool {
        match verify_schnorr(&self.secp, signature_hex, message_hex, pubkey_hex) {
            Ok(()) => true,
            Err(e) => {
                tracing::trace!(pubkey = pubkey_hex, error = %e, "signature check failed");
                false
            }
        }
    }

    /// Checks identity, then authorship by `event.pubkey`.
    pub fn verify_event(&self, event: &Event) -> Result<(), Rejection> {
        if !self.verify_identity(event) {
            return Err(Rejection::IdentityMismatch);
        }
        if !self.verify_signature(&event.sig, &event.id, &event.pubkey) {
            return Err(Rejection::SignatureInvalid);
        }
        Ok(())
    }

    /// Authenticates `token` and checks `event` against its constraints.
    ///
    /// The grammar is checked before any signature work. The token signature
    /// must cover `nostr:delegation:<event.pubkey>:<conditions>`, signed by
    /// `token.delegator`.
    pub fn verify_delegation(
        &self,
        token: &DelegationToken,
        event: &Event,
    ) -> Result<DelegationConstraints, Rejection> {
        let constraints =
            parse_conditions(&token.conditions).map_err(Rejection::DelegationGrammarInvalid)?;

        let digest = sha256_hex(delegation_message(&event.pubkey, &token.conditions));
        if !self.verify_signature(&token.sig, &digest, &token.delegator) {
            return Err(Rejection::DelegationSignatureInvalid);
        }

        constraints.check(event.kind, event.created_at)?;
        Ok(constraints)
    }

    /// Full validation without shape checks: identity, signature, and the
    /// event's `delegation` tag when one is present.
    pub fn validate(&self, event: &Event) -> Result<Acceptance, Rejection> {
        let result = self.validate_inner(event);
        match &result {
            Ok(a) => tracing::trace!(event_id = %a.id, author = a.effective_author(), "event accepted"),
            Err(r) => tracing::debug!(event_id = %event.id, code = r.code(), reason = %r, "event rejected"),
        }
        result
    }

    /// Shape checks against `limits`, then [`validate`](Self::validate).
    ///
    /// A readable `delegation` tag has its delegator key and signature
    /// checked here too. A tag with the wrong arity is left to `validate`.
    pub fn validate_with_limits(&self, event: &Event, limits: &Limits) -> Result<Acceptance, Rejection> {
        let shaped = shape::check_event(event, limits).and_then(|()| {
            match event.find_tag(DELEGATION_TAG).map(DelegationToken::from_tag) {
                Some(Ok(token)) => shape::check_delegation_shape(&token),
                _ => Ok(()),
            }
        });
        if let Err(e) = shaped {
            let rejection = Rejection::from(e);
            tracing::debug!(event_id = %event.id, code = rejection.code(), reason = %rejection, "event rejected");
            return Err(rejection);
        }
        self.validate(event)
    }

    fn validate_inner(&self, event: &Event) -> Result<Acceptance, Rejection> {
        self.verify_event(event)?;

        let mut acceptance = Acceptance {
            id: event.id.clone(),
            signer: event.pubkey.clone(),
            delegator: None,
            constraints: None,
        };
        if let Some(tag) = event.find_tag(DELEGATION_TAG) {
            let token = DelegationToken::from_tag(tag).map_err(Rejection::DelegationGrammarInvalid)?;
            let constraints = self.verify_delegation(&token, event)?;
            acceptance.delegator = Some(token.delegator);
            acceptance.constraints = Some(constraints);
        }
        Ok(acceptance)
    }
}
