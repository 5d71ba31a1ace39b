use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AlertKind {
    #[default]
    Error,
    Success,
    Info,
}

impl AlertKind {
    fn class(&self) -> &'static str {
        match self {
            AlertKind::Error => "error",
            AlertKind::Success => "success",
            AlertKind::Info => "info",
        }
    }
}

/// Inline banner for request errors and confirmations. Renders nothing for an empty message.
#[component]
pub fn Alert(
    #[props(default)] kind: AlertKind,
    message: String,
    #[props(default)] on_dismiss: Option<EventHandler<()>>,
) -> Element {
    if message.is_empty() {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "alert", "data-kind": kind.class(), role: "alert",
            span { class: "alert-message", "{message}" }
            if let Some(handler) = on_dismiss {
                button {
                    class: "alert-dismiss",
                    r#type: "button",
                    "aria-label": "Dismiss",
                    onclick: move |_| handler.call(()),
                    "×"
                }
            }
        }
    }
}
