//! Group detail page with live member messages.

use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use serde::{Deserialize, Serialize};

use crate::app::use_api;
use crate::config::client_config;

/// A message posted to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMessage {
    #[serde(default)]
    pub sender: Option<String>,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct NewMessage<'a> {
    content: &'a str,
}

fn messages_path(group_id: &str) -> String {
    format!("/groups/{group_id}/messages")
}

/// Shows one group's messages, refreshed on a fixed interval.
///
/// The refresh timer is cancelled when the page unmounts.
#[component]
pub fn GroupDetailPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let params = use_params_map();
    let group_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let (messages, set_messages) = signal(Vec::<GroupMessage>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (draft, set_draft) = signal(String::new());
    let (sending, set_sending) = signal(false);

    let refresh = move || {
        let api = api.get_value();
        let id = group_id.get_untracked();
        spawn_local(async move {
            // A cleared session has already sent the gate to the login view.
            if !api.session().state().is_authenticated() {
                return;
            }
            match api.get_json::<Vec<GroupMessage>>(&messages_path(&id)).await {
                Ok(list) => {
                    set_messages.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    tracing::warn!(error = %e, group = %id, "Failed to refresh messages");
                    set_error.set(Some("Could not load messages.".to_string()));
                }
            }
        });
    };

    Effect::new(move || {
        let _ = group_id.get();
        refresh();
    });

    match set_interval_with_handle(refresh, client_config().poll_interval()) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => tracing::warn!(error = ?e, "Failed to start message refresh"),
    }

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let content = draft.get();
        if content.trim().is_empty() {
            return;
        }
        set_sending.set(true);
        let api = api.get_value();
        let id = group_id.get_untracked();
        spawn_local(async move {
            let sent: Result<GroupMessage, _> = api
                .post_json(&messages_path(&id), &NewMessage { content: &content })
                .await;
            match sent {
                Ok(message) => {
                    set_messages.update(|list| list.push(message));
                    set_draft.set(String::new());
                }
                Err(e) => {
                    tracing::warn!(error = %e, group = %id, "Failed to send message");
                    set_error.set(Some("Could not send message.".to_string()));
                }
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="group-page">
            <h1>{move || format!("Group {}", group_id.get())}</h1>
            {move || error.get().map(|msg| view! { <div class="error-message">{msg}</div> })}
            <ul class="message-list">
                {move || {
                    messages
                        .get()
                        .into_iter()
                        .map(|message| {
                            let sender = message.sender.unwrap_or_else(|| "unknown".to_string());
                            view! {
                                <li class="message">
                                    <span class="sender">{sender}</span>
                                    <span class="content">{message.content}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <form class="message-form" on:submit=on_send>
                <input
                    type="text"
                    placeholder="Write a message"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || sending.get() || draft.get().trim().is_empty()>
                    "Send"
                </button>
            </form>
        </div>
    }
}
