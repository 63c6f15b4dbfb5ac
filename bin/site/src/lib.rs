//! Reykjavík Excursions web site.
//!
//! This crate provides the Leptos-based site shell and the embedded
//! assistant chat widget. The `ssr` feature builds the axum server, the
//! `hydrate` feature builds the WASM client.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
pub mod endpoint;
pub mod error;
#[cfg(feature = "hydrate")]
pub mod logging;
pub mod pages;
pub mod storage;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::hydrate_body(App);
}
