use crate::auth::{use_api, use_auth};
use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdGraduationCap;
use dioxus_free_icons::Icon;
use shared_types::LoginRequest;
use shared_ui::{Alert, Button, Card, TextField};
use std::collections::HashMap;

/// Username + password sign-in. On success the session is stored and the
/// guard forwards the user to their role's home page.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(String::new);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let request = LoginRequest {
            username: username().trim().to_string(),
            password: password(),
        };

        let mut missing = HashMap::new();
        if request.username.is_empty() {
            missing.insert("username".to_string(), "Username is required".to_string());
        }
        if request.password.is_empty() {
            missing.insert("password".to_string(), "Password is required".to_string());
        }
        if !missing.is_empty() {
            field_errors.set(missing);
            return;
        }

        spawn(async move {
            loading.set(true);
            error_msg.set(String::new());
            field_errors.set(HashMap::new());

            match api.sign_in(&request).await {
                Ok((user, token)) => {
                    let home = user.role.home_page();
                    auth.sign_in(user, token);
                    navigator().replace(Route::from_page(home));
                }
                Err(err) => {
                    if err.field_errors.is_empty() {
                        error_msg.set(err.friendly_message());
                    } else {
                        field_errors.set(err.field_errors);
                    }
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                div { class: "auth-header",
                    div { class: "auth-logo",
                        Icon::<LdGraduationCap> { icon: LdGraduationCap, width: 28, height: 28 }
                    }
                    h1 { class: "auth-title", "Welcome Back" }
                    p { class: "auth-subtitle", "Sign in to your account to continue" }
                }

                Alert { message: error_msg() }

                form { class: "auth-form", onsubmit: handle_login,
                    TextField {
                        label: "Username",
                        placeholder: "your.username",
                        value: username(),
                        on_input: move |v: String| username.set(v),
                        error: field_errors.read().get("username").cloned(),
                        required: true,
                    }
                    TextField {
                        label: "Password",
                        input_type: "password",
                        placeholder: "Enter your password",
                        value: password(),
                        on_input: move |v: String| password.set(v),
                        error: field_errors.read().get("password").cloned(),
                        required: true,
                    }
                    Button {
                        class: "auth-submit",
                        button_type: "submit",
                        loading: loading(),
                        if loading() { "Signing in..." } else { "Sign In" }
                    }
                }

                p { class: "auth-footer",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Register here" }
                }
            }
        }
    }
}
