//! Arden Web Frontend
//!
//! Leptos-based WASM frontend: campaign discovery, builder dashboard and
//! wallet-backed registry profile.

mod app;
mod components;
mod pages;
mod state;
mod storage;
mod wallet;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(App);
}
