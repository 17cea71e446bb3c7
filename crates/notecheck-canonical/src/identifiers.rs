use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses a validated value from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                static PATTERN: OnceLock<Regex> = OnceLock::new();
                let s = value.into();
                let re = PATTERN.get_or_init(|| Regex::new($pattern).expect("invalid regex"));
                if !re.is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Returns `true` when `value` matches the pattern.
            pub fn is_valid(value: &str) -> bool {
                Self::parse(value).is_ok()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    EventIdHex,
    "Event identifier: 64 lowercase hex characters.",
    r"^[a-f0-9]{64}$"
);
newtype!(
    PublicKeyHex,
    "x-only secp256k1 public key: 64 lowercase hex characters.",
    r"^[a-f0-9]{64}$"
);
newtype!(
    SignatureHex,
    "BIP-340 Schnorr signature: 128 lowercase hex characters.",
    r"^[a-f0-9]{128}$"
);
newtype!(
    IdPrefix,
    "Identifier or author prefix used in filters (4 to 64 lowercase hex characters).",
    r"^[a-f0-9]{4,64}$"
);
