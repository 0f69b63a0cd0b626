//! Account registration page.

use groupdesk_client::Registration;
use groupdesk_session::Role;
use groupdesk_session::gate::LOGIN_PATH;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::use_api;

/// Parses the role selector's value.
fn parse_role(value: &str) -> Option<Role> {
    Role::ALL.into_iter().find(|role| role.as_str() == value)
}

/// Registration form. Does not log in; success returns to the login page.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::Student);
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let registration = Registration {
            username: username.get(),
            email: email.get(),
            password: password.get(),
            role: role.get(),
        };
        if registration.username.is_empty()
            || registration.email.is_empty()
            || registration.password.is_empty()
        {
            set_error.set(Some("All fields are required.".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);
        let api = api.get_value();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.register(&registration).await {
                Ok(()) => navigate(LOGIN_PATH, Default::default()),
                Err(e) => {
                    tracing::info!(error = %e, "Registration failed");
                    set_error.set(Some("Registration failed. Try another username.".to_string()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-box" on:submit=on_submit>
                <h1>"Create an account"</h1>
                {move || error.get().map(|msg| view! { <div class="error-message">{msg}</div> })}
                <label for="username">"Username"</label>
                <input
                    id="username"
                    type="text"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <label for="email">"Email"</label>
                <input
                    id="email"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <label for="role">"Role"</label>
                <select
                    id="role"
                    on:change=move |ev| {
                        if let Some(parsed) = parse_role(&event_target_value(&ev)) {
                            set_role.set(parsed);
                        }
                    }
                >
                    {Role::ALL
                        .into_iter()
                        .map(|option| {
                            view! {
                                <option value=option.as_str() selected=move || role.get() == option>
                                    {option.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button type="submit" class="login-button" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
                <p class="form-footer">
                    "Already registered? "
                    <A href=LOGIN_PATH>"Log in"</A>
                </p>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_role_accepts_selector_values() {
        assert_eq!(parse_role("admin"), Some(Role::Admin));
        assert_eq!(parse_role("student"), Some(Role::Student));
        assert_eq!(parse_role("Student"), None);
        assert_eq!(parse_role(""), None);
    }
}
