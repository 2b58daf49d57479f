//! WebAssembly entry point for the glimmer gallery.
//!
//! Hydrates the server-rendered page so deferred images can register their
//! visibility observers, and routes logging and panics to the browser console.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates the gallery in the browser.
pub fn hydrate() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    log::debug!("hydrating glimmer gallery");
    leptos::mount::hydrate_body(glimmer::component);
}
