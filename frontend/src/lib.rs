use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

mod api;
mod components;
pub mod config;
mod pages;
#[cfg(test)]
mod test_support;
pub mod utils;

use components::layout::Layout;
use pages::OvertimeRoute;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("starting overtime frontend");

    // Resolves the API endpoint and time zone in the background; requests
    // await the same cached value.
    leptos::spawn_local(async move {
        config::init().await;
    });

    mount_to_body(App);
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    view! {
        <Title text="Overtime"/>
        <Router>
            <Routes>
                <Route path="/overtime/:user_id" view=OvertimeRoute/>
                <Route path="/*any" view=NotFound/>
            </Routes>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <Layout>
            <div class="text-center py-16">
                <h2 class="text-2xl font-semibold text-gray-900">"Page not found"</h2>
                <p class="mt-2 text-sm text-gray-600">
                    "Open /overtime/<user id> to see a user's overtime entries."
                </p>
            </div>
        </Layout>
    }
}
