//! Main Leptos application component and routing.

use groupdesk_client::ApiClient;
use groupdesk_session::gate::HOME_PATH;
use groupdesk_session::{RouteDecision, SessionContext, SessionState};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    hooks::{use_location, use_navigate},
    path,
};

use crate::config::client_config;
use crate::pages::{DashboardPage, GroupDetailPage, LoginPage, RegisterPage, SectionPage};
use crate::sidebar::Sidebar;
use crate::storage::browser_session;

/// Reactive mirror of the session gate, provided as context.
///
/// Updated by a [`SessionContext`] listener so views re-render on login
/// and logout without polling storage.
#[derive(Debug, Clone, Copy)]
pub struct SessionSignal(pub RwSignal<SessionState>);

impl SessionSignal {
    /// Returns the current gate state, tracking it reactively.
    #[must_use]
    pub fn get(&self) -> SessionState {
        self.0.get()
    }
}

/// Returns the injected session.
///
/// # Panics
///
/// Panics if called outside [`App`].
#[must_use]
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Returns the injected API client.
///
/// # Panics
///
/// Panics if called outside [`App`].
#[must_use]
pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

/// Returns the reactive session state.
///
/// # Panics
///
/// Panics if called outside [`App`].
#[must_use]
pub fn use_session_state() -> SessionSignal {
    expect_context::<SessionSignal>()
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = browser_session();
    let api = match ApiClient::new(&client_config(), session.clone()) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build API client");
            return view! {
                <div class="error-message">"The dashboard could not start. Please reload."</div>
            }
            .into_any();
        }
    };

    let state = RwSignal::new(session.state());
    let listener = session.subscribe(move |next| state.set(next));
    {
        let session = session.clone();
        on_cleanup(move || {
            session.unsubscribe(listener);
        });
    }

    provide_context(session);
    provide_context(api);
    provide_context(SessionSignal(state));

    view! {
        <Title text="groupdesk"/>
        <Router>
            <Gate/>
            <div class="layout">
                <Show when=move || state.get().is_authenticated()>
                    <Sidebar/>
                </Show>
                <main class="container">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=path!("/") view=|| view! { <Redirect path=HOME_PATH/> }/>
                        <Route path=path!("/login") view=LoginPage/>
                        <Route path=path!("/register") view=RegisterPage/>
                        <Route path=path!("/dashboard") view=DashboardPage/>
                        <Route path=path!("/dashboard/group/:id") view=GroupDetailPage/>
                        <Route path=path!("/dashboard/:section") view=SectionPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
    .into_any()
}

/// Redirects between the public and authenticated route sets.
///
/// Re-evaluated whenever the path or the session state changes, so a
/// cleared session (logout or a rejected token) lands on the login view.
#[component]
fn Gate() -> impl IntoView {
    let state = use_session_state();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move || {
        let path = location.pathname.get();
        if let RouteDecision::Redirect(to) = state.get().route(&path) {
            tracing::debug!(from = %path, to, "Session gate redirect");
            navigate(to, Default::default());
        }
    });
}
