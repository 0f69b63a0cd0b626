//! Error types for the API client.
//!
//! Errors are designed for layered context using rootcause: client methods
//! return `Report<ClientError>` and callers add their own context on top.

use std::fmt;

/// Errors from talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// An authorized call was attempted with no stored session token.
    NotAuthenticated,
    /// The backend rejected the session token (HTTP 401).
    ///
    /// The client has already cleared the session when this is returned.
    Unauthorized { message: String },
    /// The backend rejected the login credentials.
    LoginRejected { status: u16, message: String },
    /// The backend answered with a non-success status.
    Status { status: u16, message: String },
    /// The request could not be sent or the response could not be read.
    Request { details: String },
    /// The response body did not have the expected shape.
    Decode { details: String },
    /// The client could not be constructed.
    Configuration { details: String },
}

impl ClientError {
    /// Returns true if the error means the user must log in again.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized { .. })
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not logged in"),
            Self::Unauthorized { message } => {
                write!(f, "session rejected by server: {message}")
            }
            Self::LoginRejected { status, message } => {
                write!(f, "login rejected ({status}): {message}")
            }
            Self::Status { status, message } => {
                write!(f, "server returned {status}: {message}")
            }
            Self::Request { details } => write!(f, "request failed: {details}"),
            Self::Decode { details } => {
                write!(f, "unexpected response body: {details}")
            }
            Self::Configuration { details } => {
                write!(f, "invalid client configuration: {details}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_code_and_message() {
        let err = ClientError::Status {
            status: 404,
            message: "group not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("group not found"));
    }

    #[test]
    fn login_rejection_display() {
        let err = ClientError::LoginRejected {
            status: 401,
            message: "invalid credentials".to_string(),
        };
        assert!(err.to_string().contains("login rejected"));
    }

    #[test]
    fn requires_login_only_for_session_errors() {
        assert!(ClientError::NotAuthenticated.requires_login());
        assert!(
            ClientError::Unauthorized {
                message: String::new()
            }
            .requires_login()
        );
        assert!(
            !ClientError::Status {
                status: 403,
                message: String::new()
            }
            .requires_login()
        );
    }
}
