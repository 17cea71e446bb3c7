//! Field-shape checks for events, filters and delegation tokens.
//!
//! These run before any hashing and only look at patterns and sizes. String
//! lengths are counted in UTF-16 code units, the unit relays have always used
//! for these bounds.

use std::collections::BTreeMap;

use notecheck_canonical::{
    Event, EventIdHex, IdPrefix, PublicKeyHex, SignatureHex, ValidationError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::delegation::DelegationToken;

/// Size and range bounds for shape checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest accepted `created_at`, `since` or `until`.
    pub max_timestamp: u64,
    /// Tags per event.
    pub max_tags: usize,
    /// Length of a tag's first element.
    pub max_tag_name_len: usize,
    /// Length of each further tag element.
    pub max_tag_value_len: usize,
    /// Length of event content.
    pub max_content_len: usize,
    /// Entries in a filter's `ids`.
    pub max_filter_ids: usize,
    /// Entries in a filter's `authors`.
    pub max_filter_authors: usize,
    /// Entries in a filter's `kinds`.
    pub max_filter_kinds: usize,
    /// Largest filter `limit`.
    pub max_filter_limit: u64,
    /// Entries per tag query (`#e`, `#p`, ...).
    pub max_filter_tag_values: usize,
    /// Length of a subscription id.
    pub max_subscription_id_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_timestamp: i32::MAX as u64,
            max_tags: 2500,
            max_tag_name_len: 255,
            max_tag_value_len: 1024,
            max_content_len: 100 * 1024,
            max_filter_ids: 1000,
            max_filter_authors: 1000,
            max_filter_kinds: 20,
            max_filter_limit: 5000,
            max_filter_tag_values: 256,
            max_subscription_id_len: 255,
        }
    }
}

/// Shape violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A field does not match its pattern or range.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A tag has no elements.
    #[error("tag {index} is empty")]
    EmptyTag {
        /// Tag position.
        index: usize,
    },
    /// A list holds too many entries.
    #[error("{field} has {count} entries, at most {max} allowed")]
    TooMany {
        /// Offending field.
        field: String,
        /// Actual entries.
        count: usize,
        /// Allowed entries.
        max: usize,
    },
    /// A string is too long.
    #[error("{field} is {len} characters, at most {max} allowed")]
    TooLong {
        /// Offending field.
        field: String,
        /// Actual length.
        len: usize,
        /// Allowed length.
        max: usize,
    },
}

/// Subscription filter as sent in a `REQ`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Event id prefixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    /// Author pubkey prefixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    /// Kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<u64>>,
    /// Lower `created_at` bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    /// Upper `created_at` bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<u64>,
    /// Maximum number of events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Tag queries keyed by field name, e.g. `#e`.
    #[serde(flatten)]
    pub tags: BTreeMap<String, Vec<String>>,
}

fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn bounded_len(field: impl Into<String>, s: &str, max: usize) -> Result<(), ShapeError> {
    let len = text_len(s);
    if len > max {
        return Err(ShapeError::TooLong {
            field: field.into(),
            len,
            max,
        });
    }
    Ok(())
}

fn bounded_count(field: impl Into<String>, count: usize, max: usize) -> Result<(), ShapeError> {
    if count > max {
        return Err(ShapeError::TooMany {
            field: field.into(),
            count,
            max,
        });
    }
    Ok(())
}

fn bounded_timestamp(field: &'static str, value: u64, limits: &Limits) -> Result<(), ShapeError> {
    if value > limits.max_timestamp {
        return Err(ValidationError::OutOfBounds {
            field,
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Checks an event's field shapes.
pub fn check_event(event: &Event, limits: &Limits) -> Result<(), ShapeError> {
    EventIdHex::parse(event.id.as_str())?;
    PublicKeyHex::parse(event.pubkey.as_str())?;
    SignatureHex::parse(event.sig.as_str())?;
    bounded_timestamp("created_at", event.created_at, limits)?;
    bounded_count("tags", event.tags.len(), limits.max_tags)?;
    for (index, tag) in event.tags.iter().enumerate() {
        let Some((name, values)) = tag.0.split_first() else {
            return Err(ShapeError::EmptyTag { index });
        };
        bounded_len(format!("tags[{index}][0]"), name, limits.max_tag_name_len)?;
        for (i, value) in values.iter().enumerate() {
            bounded_len(
                format!("tags[{index}][{}]", i + 1),
                value,
                limits.max_tag_value_len,
            )?;
        }
    }
    bounded_len("content", &event.content, limits.max_content_len)
}

/// Checks a subscription filter's field shapes.
pub fn check_filter(filter: &Filter, limits: &Limits) -> Result<(), ShapeError> {
    if let Some(ids) = &filter.ids {
        bounded_count("ids", ids.len(), limits.max_filter_ids)?;
        for id in ids {
            IdPrefix::parse(id.as_str())?;
        }
    }
    if let Some(authors) = &filter.authors {
        bounded_count("authors", authors.len(), limits.max_filter_authors)?;
        for author in authors {
            IdPrefix::parse(author.as_str())?;
        }
    }
    if let Some(kinds) = &filter.kinds {
        bounded_count("kinds", kinds.len(), limits.max_filter_kinds)?;
    }
    if let Some(since) = filter.since {
        bounded_timestamp("since", since, limits)?;
    }
    if let Some(until) = filter.until {
        bounded_timestamp("until", until, limits)?;
    }
    if let Some(limit) = filter.limit {
        if limit > limits.max_filter_limit {
            return Err(ValidationError::OutOfBounds {
                field: "limit",
                value: limit.to_string(),
            }
            .into());
        }
    }
    for (name, values) in &filter.tags {
        bounded_count(name.as_str(), values.len(), limits.max_filter_tag_values)?;
        for value in values {
            bounded_len(name.as_str(), value, limits.max_tag_value_len)?;
        }
    }
    Ok(())
}

/// Checks a subscription id (1 to `max_subscription_id_len` characters).
pub fn check_subscription_id(id: &str, limits: &Limits) -> Result<(), ShapeError> {
    if id.is_empty() {
        return Err(ValidationError::OutOfBounds {
            field: "subscription_id",
            value: String::new(),
        }
        .into());
    }
    bounded_len("subscription_id", id, limits.max_subscription_id_len)
}

/// Checks the delegator key and signature patterns of a token.
///
/// The condition string is left to the grammar parser.
pub fn check_delegation_shape(token: &DelegationToken) -> Result<(), ShapeError> {
    PublicKeyHex::parse(token.delegator.as_str())?;
    SignatureHex::parse(token.sig.as_str())?;
    Ok(())
}
