//! AgriVision Web – Leptos front end for crop disease detection.

pub mod app;
pub mod browser;
pub mod components;
pub mod pages;
pub mod theme;

/// Entry-point called from the WASM bundle to hydrate the server-rendered HTML.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount_to_body(app::App);
}
