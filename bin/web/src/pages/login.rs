//! Login page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::app::use_api;

/// Username/password login form.
///
/// A successful login stores the token; the session gate then moves the
/// user to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let api = StoredValue::new(use_api());

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = username.get();
        let secret = password.get();
        if name.is_empty() || secret.is_empty() {
            set_error.set(Some("Enter your username and password.".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        let api = api.get_value();
        spawn_local(async move {
            if let Err(e) = api.login(&name, &secret).await {
                tracing::info!(error = %e, "Login failed");
                set_error.set(Some("Invalid username or password.".to_string()));
                set_password.set(String::new());
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-box" on:submit=on_submit>
                <h1>"Log in to groupdesk"</h1>
                {move || error.get().map(|msg| view! { <div class="error-message">{msg}</div> })}
                <label for="username">"Username"</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" class="login-button" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Log in" }}
                </button>
                <p class="form-footer">
                    "No account yet? "
                    <A href="/register">"Register"</A>
                </p>
            </form>
        </div>
    }
}
