use thiserror::Error;

use crate::delegation::GrammarError;
use crate::shape::ShapeError;

/// Why an event was rejected.
///
/// The `Display` text of each variant is a stable reason string that callers
/// and tests may match on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Field shapes fall outside the configured limits.
    #[error("malformed event: {0}")]
    Malformed(#[from] ShapeError),
    /// The claimed identifier is not the hash of the canonical form.
    #[error("identifier does not equal hash of canonical form")]
    IdentityMismatch,
    /// The event signature does not verify under its public key.
    #[error("signature does not match public key")]
    SignatureInvalid,
    /// The delegation token could not be read.
    #[error("invalid delegation token")]
    DelegationGrammarInvalid(#[source] GrammarError),
    /// The delegation token's own signature does not verify.
    #[error("invalid delegation token signature")]
    DelegationSignatureInvalid,
    /// The event falls outside what the delegation allows.
    #[error(transparent)]
    DelegationConstraintViolation(#[from] ConstraintViolation),
}

impl Rejection {
    /// Short machine-readable code for the rejection kind.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::Malformed(_) => "malformed",
            Rejection::IdentityMismatch => "identity_mismatch",
            Rejection::SignatureInvalid => "signature_invalid",
            Rejection::DelegationGrammarInvalid(_) => "delegation_grammar_invalid",
            Rejection::DelegationSignatureInvalid => "delegation_signature_invalid",
            Rejection::DelegationConstraintViolation(_) => "delegation_constraint_violation",
        }
    }
}

/// A delegated event outside the delegation's constraints.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Kind is not in the permitted list.
    #[error("not delegated for this kind")]
    KindNotDelegated {
        /// Event kind.
        kind: u64,
    },
    /// Created after the `to` bound.
    #[error("not delegated that far into the future")]
    TooFarInFuture {
        /// Event timestamp.
        created_at: u64,
        /// Upper bound.
        to: u64,
    },
    /// Created before the `from` bound.
    #[error("not delegated that far into the past")]
    TooFarInPast {
        /// Event timestamp.
        created_at: u64,
        /// Lower bound.
        from: u64,
    },
}
