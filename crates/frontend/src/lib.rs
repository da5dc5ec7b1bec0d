//! Feedback Tracker - Yew WASM Frontend
//!
//! Login, manager and employee dashboards, feedback forms and team
//! management, all talking to the backend through `api_client`.

mod app;
mod components;
mod pages;
mod storage;

pub use app::App;
pub use storage::LocalStorageStore;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn main() {
    yew::Renderer::<App>::new().render();
}

pub(crate) fn console_error(message: &str) {
    web_sys::console::error_1(&message.into());
}
