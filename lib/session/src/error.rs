//! Error types for the session crate.
//!
//! Only token decoding can fail here. A missing token is not an error: the
//! token store returns `Option` and callers check presence before decoding.

use std::fmt;

/// Errors from decoding a session token's claims payload.
///
/// Decoding is structural only. These errors never indicate a bad
/// signature because signatures are not checked client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token does not have exactly three dot-separated segments.
    SegmentCount { found: usize },
    /// The payload segment is not valid base64url.
    InvalidEncoding { reason: String },
    /// The payload decoded but is not a claims JSON object.
    InvalidPayload { reason: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SegmentCount { found } => {
                write!(f, "malformed token: expected 3 segments, found {found}")
            }
            Self::InvalidEncoding { reason } => {
                write!(f, "malformed token: payload is not base64url: {reason}")
            }
            Self::InvalidPayload { reason } => {
                write!(f, "malformed token: invalid claims payload: {reason}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_count_display() {
        let err = DecodeError::SegmentCount { found: 2 };
        assert!(err.to_string().contains("expected 3 segments"));
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn invalid_encoding_display() {
        let err = DecodeError::InvalidEncoding {
            reason: "Invalid symbol 36, offset 4.".to_string(),
        };
        assert!(err.to_string().contains("base64url"));
        assert!(err.to_string().contains("offset 4"));
    }

    #[test]
    fn invalid_payload_display() {
        let err = DecodeError::InvalidPayload {
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().contains("claims payload"));
    }
}
