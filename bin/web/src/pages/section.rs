//! Generic list page for dashboard sections.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use serde_json::Value;

use crate::app::use_api;

/// Maps a `/dashboard/:section` segment to its backend collection.
fn section_endpoint(section: &str) -> Option<&'static str> {
    match section {
        "project" => Some("/projects"),
        "group" => Some("/groups"),
        "instructor" => Some("/instructors"),
        "messages" => Some("/messages"),
        "notifications" => Some("/notifications"),
        "profile" => Some("/users/me"),
        _ => None,
    }
}

/// Title shown above a section.
fn section_title(section: &str) -> &'static str {
    match section {
        "project" => "Projects",
        "group" => "Groups",
        "instructor" => "Instructors",
        "messages" => "Messages",
        "notifications" => "Notifications",
        "profile" => "Profile",
        _ => "Not found",
    }
}

/// Best-effort one-line label for a backend record.
fn record_label(record: &Value) -> String {
    ["name", "title", "username", "content"]
        .iter()
        .find_map(|key| record.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| record.to_string())
}

/// Flattens a response into displayable rows.
fn rows(body: &Value) -> Vec<(Option<String>, String)> {
    let records = match body {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    records
        .into_iter()
        .map(|record| {
            let id = record.get("id").map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
            (id, record_label(record))
        })
        .collect()
}

/// Lists the records behind the current section.
#[component]
pub fn SectionPage() -> impl IntoView {
    let api = StoredValue::new(use_api());
    let params = use_params_map();
    let section = Memo::new(move |_| params.with(|p| p.get("section").unwrap_or_default()));

    let (records, set_records) = signal(Option::<Result<Value, String>>::None);

    Effect::new(move || {
        let current = section.get();
        set_records.set(None);
        let Some(endpoint) = section_endpoint(&current) else {
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            let result = api.get_json::<Value>(endpoint).await.map_err(|e| {
                tracing::warn!(error = %e, endpoint, "Failed to load section");
                "Failed to load. Please try again.".to_string()
            });
            // Drop stale responses after a quick section switch.
            if section.get_untracked() == current {
                set_records.set(Some(result));
            }
        });
    });

    view! {
        <div class="section-page">
            <h1>{move || section_title(&section.get())}</h1>
            {move || {
                let current = section.get();
                if section_endpoint(&current).is_none() {
                    return view! { <p>"Page not found."</p> }.into_any();
                }
                match records.get() {
                    None => view! { <p>"Loading..."</p> }.into_any(),
                    Some(Err(msg)) => view! { <div class="error-message">{msg}</div> }.into_any(),
                    Some(Ok(body)) => {
                        let rows = rows(&body);
                        if rows.is_empty() {
                            return view! { <p class="empty">"Nothing here yet."</p> }.into_any();
                        }
                        view! {
                            <ul class="record-list">
                                {rows
                                    .into_iter()
                                    .map(|(id, label)| {
                                        let link = (current == "group")
                                            .then_some(id)
                                            .flatten()
                                            .map(|id| format!("/dashboard/group/{id}"));
                                        match link {
                                            Some(href) => view! {
                                                <li><a href=href>{label}</a></li>
                                            }.into_any(),
                                            None => view! { <li>{label}</li> }.into_any(),
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any()
                    }
                }
            }}
        </div>
    }
}
