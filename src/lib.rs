pub mod app;
pub mod booking;
pub mod calendar;
pub mod components;
pub mod error;
pub mod models;
pub mod pages;
pub mod review_store;
pub mod review_view;
pub mod storage;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    leptos::mount_to_body(App);
}
