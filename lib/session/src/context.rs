//! The injected session value.
//!
//! [`SessionContext`] is the single owner of the token store. Views and the
//! API client receive a clone of it instead of reading storage directly, and
//! learn about logins and logouts through explicit listeners.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::claims::{self, Claims, SessionToken};
use crate::error::DecodeError;
use crate::gate::SessionState;
use crate::navigation::{Navigation, NavigationState};
use crate::role::{self, Capabilities, RoleSet};
use crate::store::{MemoryTokenStore, TokenStore};

/// Handle returned by [`SessionContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(SessionState) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

struct Inner {
    store: Box<dyn TokenStore>,
    listeners: Mutex<Listeners>,
}

/// Shared handle to the session token and its subscribers.
///
/// Cloning is cheap; all clones see the same store and listeners. Role and
/// claim queries re-read the store on every call so they always reflect the
/// current token.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl SessionContext {
    /// Creates a context over the given store.
    #[must_use]
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                store: Box::new(store),
                listeners: Mutex::new(Listeners::default()),
            }),
        }
    }

    /// Creates a context over an empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Returns the stored token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.inner.store.get().map(SessionToken::from)
    }

    /// Returns the gate state for the stored token.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState::from_token(self.inner.store.get().as_deref())
    }

    /// Decodes the stored token's claims.
    ///
    /// Returns `None` when no token is stored.
    #[must_use]
    pub fn claims(&self) -> Option<Result<Claims, DecodeError>> {
        self.inner.store.get().map(|token| claims::decode(&token))
    }

    /// Resolves the role set of the stored token.
    ///
    /// Missing or malformed tokens yield an empty set.
    #[must_use]
    pub fn roles(&self) -> RoleSet {
        role::roles_for_token(self.inner.store.get().as_deref())
    }

    /// Returns the capability flags of the stored token.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.roles().capabilities()
    }

    /// Filters `navigation` for the current roles and selects `path`.
    #[must_use]
    pub fn navigation(&self, navigation: &Navigation, path: &str) -> NavigationState {
        NavigationState::mount(navigation, &self.roles(), path)
    }

    /// Persists a freshly issued token and notifies listeners.
    pub fn set_token(&self, token: &SessionToken) {
        self.inner.store.set(token.as_str());
        tracing::debug!("Session token stored");
        self.notify(SessionState::Authenticated);
    }

    /// Clears all persisted session state and notifies listeners.
    pub fn clear(&self) {
        self.inner.store.clear();
        tracing::debug!("Session state cleared");
        self.notify(SessionState::Unauthenticated);
    }

    /// Registers a listener called with the new state after every
    /// [`set_token`](Self::set_token) and [`clear`](Self::clear).
    pub fn subscribe(&self, listener: impl Fn(SessionState) + Send + Sync + 'static) -> ListenerId {
        let mut listeners = self.lock_listeners();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Listeners> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, state: SessionState) {
        // Snapshot so listeners may subscribe or unsubscribe re-entrantly.
        let snapshot: Vec<Listener> = self
            .lock_listeners()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(state);
        }
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &self.state())
            .field("listeners", &self.lock_listeners().entries.len())
            .finish()
    }
}
