//! Typed identifiers for blogs, comments and users
//!
//! All three wrap a UUID. The nil UUID is never a valid identifier: parsing
//! rejects it and services treat it as malformed input.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error when parsing an identifier from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid {kind} id format")]
    InvalidFormat { kind: &'static str },

    #[error("{kind} id must not be nil")]
    Nil { kind: &'static str },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Human readable name of the identified resource
            pub const KIND: &'static str = $kind;

            /// Generate a fresh random identifier
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_uuid(self) -> Uuid {
                self.0
            }

            #[inline]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            /// Parse from string representation, rejecting the nil UUID
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                let id = Uuid::parse_str(s.trim())
                    .map_err(|_| IdParseError::InvalidFormat { kind: $kind })?;
                if id.is_nil() {
                    return Err(IdParseError::Nil { kind: $kind });
                }
                Ok(Self(id))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a blog post
    BlogId,
    "blog"
);
define_id!(
    /// Identifier of a comment
    CommentId,
    "comment"
);
define_id!(
    /// Identifier of a user (issued by the external auth service)
    UserId,
    "user"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let raw = "6f1c2a8e-5d4b-4a57-9a41-3f0f3c7e2b10";
        let id: BlogId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
        assert!(!id.is_nil());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = UserId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err, IdParseError::InvalidFormat { kind: "user" });
        assert_eq!(err.to_string(), "invalid user id format");
    }

    #[test]
    fn test_parse_rejects_nil() {
        let err = CommentId::parse("00000000-0000-0000-0000-000000000000").unwrap_err();
        assert_eq!(err, IdParseError::Nil { kind: "comment" });
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(BlogId::new(), BlogId::new());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));

        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
