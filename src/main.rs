//! Listing Frontend Entry Point

mod api;
mod app;
mod browser;
mod components;
mod context;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("Listing", log::LevelFilter::Debug) {
        web_sys::console::error_1(&format!("[APP] logger init failed: {}", e).into());
    }
    mount_to_body(App);
}
