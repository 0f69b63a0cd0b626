//! Browser persistence for the session token.

use groupdesk_session::SessionContext;
#[cfg(feature = "csr")]
use groupdesk_session::{TOKEN_KEY, TokenStore};

/// Token store backed by `window.localStorage`.
///
/// Storage access errors (private browsing, disabled storage) degrade to
/// "no token" rather than failing the render.
#[cfg(feature = "csr")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(feature = "csr")]
impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn set(&self, token: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(TOKEN_KEY, token).is_err() {
                tracing::warn!("Failed to persist session token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            if storage.clear().is_err() {
                tracing::warn!("Failed to clear persisted session state");
            }
        }
    }
}

/// Creates the session context for this build target.
///
/// The browser build persists the token in local storage; other builds
/// keep it in memory.
#[must_use]
pub fn browser_session() -> SessionContext {
    #[cfg(feature = "csr")]
    {
        SessionContext::new(LocalStorageTokenStore)
    }
    #[cfg(not(feature = "csr"))]
    {
        SessionContext::in_memory()
    }
}
