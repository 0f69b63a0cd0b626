//! Client-side persistence of the session token.
//!
//! Stores are plain key-value access with no validation. The browser build
//! keeps the token in `localStorage`; native code and tests use
//! [`MemoryTokenStore`].

use std::sync::{Mutex, PoisonError};

/// Storage key under which the session token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Persistent holder of the session token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn get(&self) -> Option<String>;

    /// Stores `token`, replacing any previous one.
    fn set(&self, token: &str);

    /// Removes the token and any other client state the store persists.
    fn clear(&self);
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        assert!(MemoryTokenStore::new().get().is_none());
    }

    #[test]
    fn set_replaces_previous_token() {
        let store = MemoryTokenStore::with_token("first");
        store.set("second");
        assert_eq!(store.get().as_deref(), Some("second"));
    }

    #[test]
    fn clear_removes_token() {
        let store = MemoryTokenStore::with_token("a.b.c");
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn store_is_usable_as_trait_object() {
        let store: Box<dyn TokenStore> = Box::new(MemoryTokenStore::new());
        store.set("x.y.z");
        assert_eq!(store.get().as_deref(), Some("x.y.z"));
    }
}
