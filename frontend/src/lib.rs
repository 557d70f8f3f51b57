use leptos::*;

pub mod api;
pub mod app;
pub mod navbar;
pub mod pages;
pub mod routes;

use app::App;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("log");
    mount_to_body(|| view! { <App/> });
}
