//! Strongly-typed ULID identifiers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

macro_rules! ulid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_string(s)
                    .map(Self)
                    .map_err(|_| DomainError::Invalid(format!("malformed {} id: {}", $label, s)))
            }
        }
    };
}

ulid_id!(
    /// Group identifier.
    GroupId,
    "group"
);
ulid_id!(
    /// User identifier.
    UserId,
    "user"
);
ulid_id!(
    /// Article identifier.
    ArticleId,
    "article"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        let id = GroupId::new();
        let parsed: GroupId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_malformed_id_is_invalid() {
        let err = "not-a-ulid".parse::<UserId>().unwrap_err();
        assert!(matches!(err, DomainError::Invalid(_)));
        assert!(err.to_string().contains("user"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ArticleId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
