//! # portal-client
//!
//! Leptos + WASM frontend for the agricultural subsidy portal.
//!
//! This crate contains pages, components, UI state machines, network types,
//! and the thin HTTP wrapper around the remote portal API. All persistence and
//! business rules live behind that API; this crate owns only view state.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("portal client hydrating");
    leptos::mount::hydrate_body(app::App);
}
