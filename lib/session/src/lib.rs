//! Session and role-gated navigation for the groupdesk dashboard.
//!
//! This crate provides:
//! - Token persistence (`TokenStore`, `MemoryTokenStore`)
//! - Unverified claims decoding (`SessionToken`, `Claims`, `decode`)
//! - Role resolution (`RoleClaim`, `RoleSet`, `Capabilities`)
//! - The side menu model (`Navigation`, `MenuEntry`, `NavigationState`)
//! - The session gate (`SessionState`, `RouteDecision`)
//! - The injected session value tying them together (`SessionContext`)
//!
//! Everything here is synchronous and free of I/O beyond the token store.
//!
//! # Example
//!
//! ```
//! use groupdesk_session::{Navigation, SessionContext, SessionState, SessionToken};
//!
//! let session = SessionContext::in_memory();
//! assert_eq!(session.state(), SessionState::Unauthenticated);
//!
//! // Payload: {"id":1,"username":"ada","role":"Admin"}
//! let token = SessionToken::new(
//!     "eyJhbGciOiJIUzI1NiJ9.eyJpZCI6MSwidXNlcm5hbWUiOiJhZGEiLCJyb2xlIjoiQWRtaW4ifQ.sig",
//! );
//! session.set_token(&token);
//!
//! assert!(session.state().is_authenticated());
//! assert!(session.roles().has_role("admin"));
//!
//! let nav = session.navigation(&Navigation::dashboard(), "/dashboard/instructor");
//! assert_eq!(nav.selected().map(|e| e.label.as_str()), Some("Instructors"));
//! ```

pub mod claims;
pub mod context;
pub mod error;
pub mod gate;
pub mod navigation;
pub mod role;
pub mod store;

// Re-export main types at crate root
pub use claims::{Claims, SessionToken, decode};
pub use context::{ListenerId, SessionContext};
pub use error::DecodeError;
pub use gate::{RouteDecision, SessionState};
pub use navigation::{MenuEntry, MenuItem, Navigation, NavigationState, Visibility, select};
pub use role::{Capabilities, Role, RoleClaim, RoleSet, resolve_roles, roles_for_token};
pub use store::{MemoryTokenStore, TOKEN_KEY, TokenStore};
