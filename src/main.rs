mod app;
mod boot;
mod idb;
mod input;
mod narration;
mod persisted;
mod persisted_store;

use wasm_bindgen_futures::spawn_local;

fn main() {
    boot::set_phase("loading", "starting app");
    spawn_local(async {
        boot::set_phase("loading", "restoring saved settings");
        if let Err(err) = persisted_store::bootstrap().await {
            gloo::console::warn!("saved state unavailable, using defaults:", err);
        }
        yew::Renderer::<app::App>::new().render();
        boot::ready();
    });
}
