//! Role-filtered side menu.

use groupdesk_session::Navigation;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::app::{use_api, use_session, use_session_state};

/// Side menu listing the entries the current roles may see.
///
/// The entry whose path equals the current location is highlighted; other
/// locations leave nothing highlighted.
#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session();
    let state = use_session_state();
    let api = use_api();
    let location = use_location();
    let menu = StoredValue::new(Navigation::dashboard());

    let navigation = Memo::new(move |_| {
        // Track login/logout so roles are re-read from the new token.
        let _ = state.get();
        let path = location.pathname.get();
        menu.with_value(|menu| session.navigation(menu, &path))
    });

    let on_logout = move |_| api.logout();

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">"groupdesk"</div>
            <ul class="sidebar-menu">
                {move || {
                    let current = navigation.get();
                    let selected = current.selected_index();
                    current
                        .entries()
                        .iter()
                        .enumerate()
                        .map(|(index, entry)| {
                            let class = if selected == Some(index) {
                                "menu-item active"
                            } else {
                                "menu-item"
                            };
                            let icon_class = format!("icon icon-{}", entry.icon);
                            let label = entry.label.clone();
                            view! {
                                <li class=class>
                                    <A href=entry.path.clone()>
                                        <span class=icon_class></span>
                                        <span class="label">{label}</span>
                                    </A>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <button class="logout-button" on:click=on_logout>"Log out"</button>
        </nav>
    }
}
