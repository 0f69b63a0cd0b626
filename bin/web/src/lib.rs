//! groupdesk web dashboard.
//!
//! This crate provides the Leptos single-page interface over the groupdesk
//! backend: login and registration, the role-gated app shell, and the
//! section pages. The `csr` feature mounts it in the browser; the `serve`
//! feature builds the static file server that ships the bundle.

#![allow(non_snake_case)]

pub mod app;
pub mod config;
pub mod pages;
pub mod sidebar;
pub mod storage;

/// Mounts the application into the document body.
#[cfg(feature = "csr")]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
