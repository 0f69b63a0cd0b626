//! The session gate: which route tree is reachable.
//!
//! The gate is a presence check on the stored token, not a validity check.
//! An expired or malformed token keeps the session `Authenticated` until it
//! is cleared; the backend is what ultimately rejects such a token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";
/// Path of the registration view.
pub const REGISTER_PATH: &str = "/register";
/// Landing path of the authenticated app shell.
pub const HOME_PATH: &str = "/dashboard";

/// Routes reachable without a session.
pub const PUBLIC_PATHS: [&str; 2] = [LOGIN_PATH, REGISTER_PATH];

/// Whether a session token is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No token is stored; only login and registration are reachable.
    Unauthenticated,
    /// A token is stored; the app shell is reachable.
    Authenticated,
}

/// Outcome of routing a path through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested path.
    Render,
    /// Send the user to another path instead.
    Redirect(&'static str),
}

impl SessionState {
    /// Derives the state from the stored token, if any.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(_) => Self::Authenticated,
            None => Self::Unauthenticated,
        }
    }

    /// Returns true for the authenticated state.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// Decides whether `path` may be rendered in this state.
    #[must_use]
    pub fn route(&self, path: &str) -> RouteDecision {
        let public = is_public_path(path);
        match self {
            Self::Unauthenticated if public => RouteDecision::Render,
            Self::Unauthenticated => RouteDecision::Redirect(LOGIN_PATH),
            Self::Authenticated if public => RouteDecision::Redirect(HOME_PATH),
            Self::Authenticated => RouteDecision::Render,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Returns true if `path` is reachable without a session.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}
