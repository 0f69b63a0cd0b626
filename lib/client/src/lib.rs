//! HTTP access to the groupdesk backend.
//!
//! This crate provides:
//! - `ApiClient`: login, registration and bearer-authorized JSON calls
//! - `ClientConfig`: backend location and timing, loadable from the environment
//! - `Poller`/`PollHandle`: cancellable fixed-interval refetching (native targets)
//!
//! The client never inspects the session token beyond attaching it. A
//! rejected token clears the injected session so the session gate falls
//! back to the login view.

pub mod api;
pub mod config;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod poll;

pub use api::{ApiClient, Registration};
pub use config::ClientConfig;
pub use error::ClientError;
#[cfg(not(target_arch = "wasm32"))]
pub use poll::{PollHandle, Poller};
