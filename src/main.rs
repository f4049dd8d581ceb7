//! Encanto Frontend Entry Point

mod admin;
mod animation;
mod api;
mod app;
mod cart;
mod checkout;
mod components;
mod config;
mod dom;
mod draft;
mod error;
mod events;
mod mask;
mod models;
mod money;
mod quantity;
mod storage;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    wasm_logger::init(wasm_logger::Config::new(level));

    // Script may run before the server-rendered markup is parsed
    match dom::document() {
        Some(doc) if doc.ready_state() == "loading" => {
            dom_keybind::bind_document_listener("DOMContentLoaded", |_| app::boot());
        }
        _ => app::boot(),
    }
}
