use dioxus::prelude::*;

mod auth;
mod config;
mod format_helpers;
mod routes;
mod tables;

use auth::AuthState;
use routes::Route;

const THEME_BASE: Asset = asset!("/assets/theme-base.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(config::load_config);
    use_context_provider(AuthState::restore);

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_BASE }
        Router::<Route> {}
    }
}
