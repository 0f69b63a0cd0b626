//! Dashboard landing page.

use leptos::prelude::*;

use crate::app::{use_session, use_session_state};

/// Greets the signed-in user and lists their roles.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let state = use_session_state();

    let identity = Memo::new(move |_| {
        let _ = state.get();
        let username = session
            .claims()
            .and_then(Result::ok)
            .and_then(|claims| claims.username().map(str::to_string));
        let roles: Vec<String> = session.roles().iter().map(str::to_string).collect();
        (username, roles)
    });

    view! {
        <div class="home-page">
            {move || {
                let (username, roles) = identity.get();
                let greeting = username
                    .map(|name| format!("Welcome, {name}!"))
                    .unwrap_or_else(|| "Welcome!".to_string());
                let roles = if roles.is_empty() {
                    "No role assigned".to_string()
                } else {
                    roles.join(", ")
                };
                view! {
                    <h1>{greeting}</h1>
                    <p class="roles">{roles}</p>
                    <p>"Pick a section from the menu to get started."</p>
                }
            }}
        </div>
    }
}
