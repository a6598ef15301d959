pub mod api;
pub mod app;
pub mod components;
pub mod markdown;
pub mod pages;
pub mod state;
pub mod storage;
pub mod types;
pub mod util;

pub use app::App;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
