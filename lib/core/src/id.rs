//! Identifier types issued by the backend.
//!
//! The backend owns identity: user IDs arrive inside session token claims and
//! are never generated client-side. Depending on the backend's storage they
//! are serialized either as strings or as integers, so [`UserId`] accepts
//! both and normalizes to a string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawUserId", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a user ID from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Wire shapes a user ID may take in a claims payload.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Text(s) => Self(s),
            RawUserId::Signed(n) => Self(n.to_string()),
            RawUserId::Unsigned(n) => Self(n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_ids() {
        let id: UserId = serde_json::from_str("\"65f1c0ffee\"").expect("deserialize");
        assert_eq!(id.as_str(), "65f1c0ffee");
    }

    #[test]
    fn deserializes_numeric_ids() {
        let id: UserId = serde_json::from_str("42").expect("deserialize");
        assert_eq!(id, UserId::new("42"));
    }

    #[test]
    fn rejects_non_scalar_ids() {
        assert!(serde_json::from_str::<UserId>("{\"id\": 1}").is_err());
        assert!(serde_json::from_str::<UserId>("1.5").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&UserId::new("u-7")).expect("serialize");
        assert_eq!(json, "\"u-7\"");
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(UserId::from("abc").to_string(), "abc");
    }
}
