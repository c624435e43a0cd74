//! Strongly-typed identifiers for domain entities
//!
//! Internal identifiers are newtype wrappers around UUIDs. The claim document
//! number is the one externally visible key and has its own fixed textual shape.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Claims domain identifiers
define_id!(ClaimId, "CLM");

// Auth domain identifiers
define_id!(UserId, "USR");

/// Shape of a claim document number: eight digits and two uppercase alphanumerics
static DOCUMENT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}[A-Z0-9]{2}$").expect("document id pattern is valid"));

/// Errors raised when parsing a document number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentIdError {
    #[error("Malformed document id: {0}")]
    Malformed(String),
}

/// Externally visible claim document number, e.g. `48213907K4`
///
/// Lookups from clients arrive as free text, so the type does not insist on
/// the canonical shape when wrapping request input. Use [`DocumentId::parse`]
/// where the shape must be enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps a caller-supplied value without checking its shape
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parses a value that must have the canonical shape
    pub fn parse(value: &str) -> Result<Self, DocumentIdError> {
        if Self::is_well_formed(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DocumentIdError::Malformed(value.to_string()))
        }
    }

    /// Checks a candidate against `^[0-9]{8}[A-Z0-9]{2}$`
    pub fn is_well_formed(value: &str) -> bool {
        DOCUMENT_ID_PATTERN.is_match(value)
    }

    /// Returns the document number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
