use dioxus::prelude::*;
use shared_types::AppPage;

use crate::auth::use_auth;
use crate::routes::Route;

/// Where an unknown path (including `/`) sends the visitor.
pub fn fallback_page(role: Option<shared_types::UserRole>) -> AppPage {
    role.map(|r| r.home_page()).unwrap_or(AppPage::Login)
}

/// Catch-all: redirect to the signed-in user's home page, or to login.
#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let auth = use_auth();
    let target = fallback_page(auth.role());

    if !route.is_empty() {
        tracing::debug!(path = %route.join("/"), to = target.path(), "Unknown path");
    }
    navigator().replace(Route::from_page(target));

    rsx! {
        div { class: "auth-guard-loading",
            p { "Redirecting..." }
        }
    }
}
