//! Delegation tokens and their condition grammar.
//!
//! A token lets a delegator key authorize another key to publish events on
//! its behalf. It travels as an event tag:
//!
//! ```text
//! ["delegation", <delegator pubkey>, <conditions>, <signature>]
//! ```
//!
//! `conditions` is a `&`-separated list of clauses, each one of
//! `kind=<n>`, `created_at><n>` or `created_at<<n>`. Parsing happens in two
//! explicit steps: [`parse_clauses`] checks the grammar, [`fold_clauses`]
//! turns clauses into [`DelegationConstraints`].

use std::sync::OnceLock;

use notecheck_canonical::Tag;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ConstraintViolation;

/// Name of the tag carrying a delegation token.
pub const DELEGATION_TAG: &str = "delegation";

/// Errors raised while reading a delegation token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A clause matches neither recognized pattern.
    #[error("clause {index} ('{clause}') is not a recognized condition")]
    UnrecognizedClause {
        /// Zero-based clause position.
        index: usize,
        /// Offending clause text.
        clause: String,
    },
    /// A clause's number does not fit in 64 bits.
    #[error("clause {index} ('{clause}') holds a value out of range")]
    ValueOutOfRange {
        /// Zero-based clause position.
        index: usize,
        /// Offending clause text.
        clause: String,
    },
    /// The delegation tag does not carry exactly three values.
    #[error("delegation tag must carry 3 values, found {0}")]
    MalformedTag(usize),
}

/// One parsed condition clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "clause", content = "value")]
pub enum Clause {
    /// `kind=<n>`: permit events of kind `n`.
    Kind(u64),
    /// `created_at><n>`: lower timestamp bound.
    CreatedAfter(u64),
    /// `created_at<<n>`: upper timestamp bound.
    CreatedBefore(u64),
}

/// Constraints a delegation places on the events it authorizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationConstraints {
    /// Permitted kinds in clause order, duplicates kept. Empty means any kind.
    pub kinds: Vec<u64>,
    /// Events created before this timestamp are not covered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    /// Events created after this timestamp are not covered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
}

impl DelegationConstraints {
    /// Checks an event's kind and timestamp.
    ///
    /// Kind is checked first, then the upper bound, then the lower bound.
    /// Both bounds are inclusive.
    pub fn check(&self, kind: u64, created_at: u64) -> Result<(), ConstraintViolation> {
        if !self.kinds.is_empty() && !self.kinds.contains(&kind) {
            return Err(ConstraintViolation::KindNotDelegated { kind });
        }
        if let Some(to) = self.to {
            if created_at > to {
                return Err(ConstraintViolation::TooFarInFuture { created_at, to });
            }
        }
        if let Some(from) = self.from {
            if created_at < from {
                return Err(ConstraintViolation::TooFarInPast { created_at, from });
            }
        }
        Ok(())
    }
}

/// A delegation credential as carried on an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationToken {
    /// Delegator x-only public key (hex).
    pub delegator: String,
    /// Condition string, verbatim.
    pub conditions: String,
    /// Delegator's Schnorr signature over the delegation message (hex).
    pub sig: String,
}

impl DelegationToken {
    /// Reads a token from a `delegation` tag.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::MalformedTag`] unless the tag has exactly three values.
    pub fn from_tag(tag: &Tag) -> Result<Self, GrammarError> {
        match tag.values() {
            [delegator, conditions, sig] => Ok(Self {
                delegator: delegator.clone(),
                conditions: conditions.clone(),
                sig: sig.clone(),
            }),
            values => Err(GrammarError::MalformedTag(values.len())),
        }
    }

    /// Renders the token as a `delegation` tag.
    pub fn to_tag(&self) -> Tag {
        Tag::new([
            DELEGATION_TAG,
            self.delegator.as_str(),
            self.conditions.as_str(),
            self.sig.as_str(),
        ])
    }
}

/// The literal string a delegator signs: `nostr:delegation:<delegatee>:<conditions>`.
///
/// `conditions` is used byte-for-byte as written in the token.
pub fn delegation_message(delegatee_pubkey: &str, conditions: &str) -> String {
    ["nostr", "delegation", delegatee_pubkey, conditions].join(":")
}

fn kind_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^kind=([0-9]+)$").expect("invalid regex"))
}

fn created_at_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^created_at([<>])([0-9]+)$").expect("invalid regex"))
}

fn parse_clause(index: usize, clause: &str) -> Result<Clause, GrammarError> {
    let out_of_range = || GrammarError::ValueOutOfRange {
        index,
        clause: clause.to_string(),
    };
    if let Some(caps) = kind_pattern().captures(clause) {
        let n = caps[1].parse().map_err(|_| out_of_range())?;
        return Ok(Clause::Kind(n));
    }
    if let Some(caps) = created_at_pattern().captures(clause) {
        let n = caps[2].parse().map_err(|_| out_of_range())?;
        return Ok(match &caps[1] {
            ">" => Clause::CreatedAfter(n),
            _ => Clause::CreatedBefore(n),
        });
    }
    Err(GrammarError::UnrecognizedClause {
        index,
        clause: clause.to_string(),
    })
}

/// Splits a condition string on `&` and parses every clause.
///
/// Fails on the first clause that matches no pattern; an empty string is a
/// single empty clause and therefore invalid.
pub fn parse_clauses(conditions: &str) -> Result<Vec<Clause>, GrammarError> {
    conditions
        .split('&')
        .enumerate()
        .map(|(i, c)| parse_clause(i, c))
        .collect()
}

/// Folds clauses left to right: kinds accumulate, bounds are last-write-wins.
pub fn fold_clauses<I>(clauses: I) -> DelegationConstraints
where
    I: IntoIterator<Item = Clause>,
{
    clauses
        .into_iter()
        .fold(DelegationConstraints::default(), |mut acc, clause| {
            match clause {
                Clause::Kind(k) => acc.kinds.push(k),
                Clause::CreatedAfter(t) => acc.from = Some(t),
                Clause::CreatedBefore(t) => acc.to = Some(t),
            }
            acc
        })
}

/// Parses a condition string into constraints.
///
/// ```rust
/// use notecheck_core::delegation::parse_conditions;
///
/// let c = parse_conditions("kind=1&kind=2&created_at>100&created_at>200&created_at<500")?;
/// assert_eq!(c.kinds, vec![1, 2]);
/// assert_eq!(c.from, Some(200));
/// assert_eq!(c.to, Some(500));
/// # Ok::<(), notecheck_core::delegation::GrammarError>(())
/// ```
pub fn parse_conditions(conditions: &str) -> Result<DelegationConstraints, GrammarError> {
    parse_clauses(conditions).map(fold_clauses)
}
