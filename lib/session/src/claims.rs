//! Session tokens and their unverified claims payload.
//!
//! A session token is issued by the backend at login and is opaque to the
//! client except for its payload segment, which carries the user's identity
//! and role claim. The payload is decoded here without any signature check:
//! trust is delegated to the issuing server and to the transport, and every
//! protected API call is still authorized server-side.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use groupdesk_core::UserId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::role::RoleClaim;

/// A session token exactly as the backend issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Decodes the token's claims payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the token is structurally malformed.
    pub fn claims(&self) -> Result<Claims, DecodeError> {
        decode(&self.0)
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identity claims embedded in a session token.
///
/// Every field is optional on the wire. Only the role claim's shape is
/// checked: identity and the registered `iat`/`exp` claims read as `None`
/// when missing or malformed, so they can never cost the user their roles.
/// `iat`/`exp` are informational and never consulted by the session gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    id: Option<UserId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<RoleClaim>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "chrono::serde::ts_seconds_option::serialize",
        deserialize_with = "lenient_timestamp"
    )]
    iat: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "chrono::serde::ts_seconds_option::serialize",
        deserialize_with = "lenient_timestamp"
    )]
    exp: Option<DateTime<Utc>>,
}

/// Reads any JSON value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Reads whole seconds since the epoch; anything else is `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .and_then(|secs| DateTime::from_timestamp(secs, 0)))
}

impl Claims {
    /// Creates claims for the given user with no role.
    #[must_use]
    pub fn new(id: UserId, username: String) -> Self {
        Self {
            id: Some(id),
            username: Some(username),
            ..Self::default()
        }
    }

    /// Sets the role claim.
    #[must_use]
    pub fn with_role(mut self, role: Option<RoleClaim>) -> Self {
        self.role = role;
        self
    }

    /// Sets the expiry claim.
    #[must_use]
    pub fn with_expiry(mut self, exp: Option<DateTime<Utc>>) -> Self {
        self.exp = exp;
        self
    }

    /// Returns the user's ID, if present.
    #[must_use]
    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    /// Returns the username, if present.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the raw role claim, if present.
    #[must_use]
    pub fn role(&self) -> Option<&RoleClaim> {
        self.role.as_ref()
    }

    /// Returns when the token was issued, if stated.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat
    }

    /// Returns when the token expires, if stated.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
    }
}

/// Decodes the claims payload of a session token.
///
/// The token must be three dot-separated segments; the second is the
/// base64url-encoded JSON payload. Trailing `=` padding and the standard
/// base64 alphabet are tolerated.
///
/// # Errors
///
/// Returns [`DecodeError::SegmentCount`] for the wrong number of segments,
/// [`DecodeError::InvalidEncoding`] when the payload is not base64, and
/// [`DecodeError::InvalidPayload`] when it is not a claims object.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount {
            found: segments.len(),
        });
    }

    let payload = segments[1]
        .trim_end_matches('=')
        .replace('+', "-")
        .replace('/', "_");

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.as_bytes())
        .map_err(|e| DecodeError::InvalidEncoding {
            reason: e.to_string(),
        })?;

    // Arrays would otherwise fill the struct positionally.
    let object: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|e| DecodeError::InvalidPayload {
            reason: e.to_string(),
        })?;

    serde_json::from_value(Value::Object(object)).map_err(|e| DecodeError::InvalidPayload {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl",
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn decodes_identity_and_single_role() {
        let token = token_with_payload(r#"{"id":"u1","username":"ada","role":"Admin"}"#);
        let claims = decode(&token).expect("decode");

        assert_eq!(claims.id(), Some(&UserId::new("u1")));
        assert_eq!(claims.username(), Some("ada"));
        assert_eq!(
            claims.role(),
            Some(&RoleClaim::Single("Admin".to_string()))
        );
    }

    #[test]
    fn decodes_role_collection_and_numeric_id() {
        let token = token_with_payload(r#"{"id":7,"username":"bo","role":["student","tutor"]}"#);
        let claims = decode(&token).expect("decode");

        assert_eq!(claims.id(), Some(&UserId::new("7")));
        assert_eq!(
            claims.role(),
            Some(&RoleClaim::Multiple(vec![
                "student".to_string(),
                "tutor".to_string()
            ]))
        );
    }

    #[test]
    fn missing_fields_decode_to_none() {
        let token = token_with_payload("{}");
        let claims = decode(&token).expect("decode");

        assert!(claims.id().is_none());
        assert!(claims.username().is_none());
        assert!(claims.role().is_none());
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn reads_registered_time_claims() {
        let token = token_with_payload(r#"{"id":"u1","iat":1700000000,"exp":1700003600}"#);
        let claims = decode(&token).expect("decode");

        let iat = claims.issued_at().expect("iat");
        let exp = claims.expires_at().expect("exp");
        assert_eq!(iat.timestamp(), 1_700_000_000);
        assert_eq!((exp - iat).num_hours(), 1);
    }

    #[test]
    fn fewer_than_three_segments_is_rejected() {
        assert_eq!(
            decode("header.payload"),
            Err(DecodeError::SegmentCount { found: 2 })
        );
        assert_eq!(decode("opaque"), Err(DecodeError::SegmentCount { found: 1 }));
        assert_eq!(decode(""), Err(DecodeError::SegmentCount { found: 1 }));
    }

    #[test]
    fn more_than_three_segments_is_rejected() {
        assert_eq!(decode("a.b.c.d"), Err(DecodeError::SegmentCount { found: 4 }));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = decode("a.$$$$.c").expect_err("should fail");
        assert!(matches!(err, DecodeError::InvalidEncoding { .. }));
    }

    #[test]
    fn non_json_payload_is_rejected() {
        let token = token_with_payload("not json");
        let err = decode(&token).expect_err("should fail");
        assert!(matches!(err, DecodeError::InvalidPayload { .. }));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let token = token_with_payload(r#"["admin"]"#);
        let err = decode(&token).expect_err("should fail");
        assert!(matches!(err, DecodeError::InvalidPayload { .. }));
    }

    #[test]
    fn positional_array_payload_is_rejected() {
        let token = token_with_payload(r#"["u1","ada","Admin"]"#);
        let err = decode(&token).expect_err("should fail");
        assert!(matches!(err, DecodeError::InvalidPayload { .. }));
        assert!(crate::role::roles_for_token(Some(&token)).is_empty());
    }

    #[test]
    fn malformed_identity_and_time_claims_read_as_none() {
        for payload in [
            r#"{"id":{"$oid":"65f"},"role":"Admin"}"#,
            r#"{"username":["a"],"role":"Admin"}"#,
            r#"{"iat":1700000000.5,"role":"Admin"}"#,
            r#"{"exp":99999999999999999,"role":"Admin"}"#,
            r#"{"id":null,"username":null,"iat":"soon","role":"Admin"}"#,
        ] {
            let claims = decode(&token_with_payload(payload)).expect(payload);
            assert!(claims.id().is_none(), "{payload}");
            assert!(claims.username().is_none(), "{payload}");
            assert!(claims.issued_at().is_none(), "{payload}");
            assert!(claims.expires_at().is_none(), "{payload}");
            assert_eq!(
                claims.role(),
                Some(&RoleClaim::Single("Admin".to_string())),
                "{payload}"
            );
        }
    }

    #[test]
    fn malformed_role_claim_is_still_rejected() {
        let token = token_with_payload(r#"{"username":"ada","role":{"name":"admin"}}"#);
        let err = decode(&token).expect_err("should fail");
        assert!(matches!(err, DecodeError::InvalidPayload { .. }));
    }

    #[test]
    fn padded_and_standard_alphabet_payloads_are_accepted() {
        use base64::engine::general_purpose::STANDARD;

        let mut raw = br#"{"username":"x","pad":""#.to_vec();
        raw.extend_from_slice(&[0xfb, 0xff]);
        let encoded = STANDARD.encode(&raw);
        assert!(encoded.contains('/') && encoded.ends_with('='));

        // Not valid UTF-8 JSON, but the encoding step must pass.
        let err = decode(&format!("h.{encoded}.s")).expect_err("invalid json");
        assert!(matches!(err, DecodeError::InvalidPayload { .. }));

        let padded = STANDARD.encode(r#"{"username":"pads"}"#);
        assert!(padded.ends_with('='));
        let claims = decode(&format!("h.{padded}.s")).expect("decode");
        assert_eq!(claims.username(), Some("pads"));
    }

    #[test]
    fn session_token_bearer_uses_raw_token() {
        let token = SessionToken::new("a.b.c");
        assert_eq!(token.bearer(), "Bearer a.b.c");
        assert_eq!(token.as_str(), "a.b.c");
    }

    #[test]
    fn session_token_claims_delegates_to_decoder() {
        let token = SessionToken::from(token_with_payload(r#"{"username":"cy"}"#));
        let claims = token.claims().expect("decode");
        assert_eq!(claims.username(), Some("cy"));

        let broken = SessionToken::from("broken");
        assert!(broken.claims().is_err());
    }

    #[test]
    fn claims_builder_round_trips_through_json() {
        let claims = Claims::new(UserId::new("u9"), "dee".to_string())
            .with_role(Some(RoleClaim::Single("Instructor".to_string())));
        let json = serde_json::to_string(&claims).expect("serialize");
        let token = token_with_payload(&json);
        assert_eq!(decode(&token).expect("decode"), claims);
    }
}
