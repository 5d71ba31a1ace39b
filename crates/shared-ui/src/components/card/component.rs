use dioxus::prelude::*;

/// Bordered surface for page sections.
#[component]
pub fn Card(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "card", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            ..merged,
            {children}
        }
    }
}

/// Title row of a Card, with room for actions on the right.
#[component]
pub fn CardHeader(title: String, #[props(default)] actions: Option<Element>) -> Element {
    rsx! {
        div { class: "card-header",
            h3 { class: "card-title", "{title}" }
            if let Some(actions) = actions {
                div { class: "card-action", {actions} }
            }
        }
    }
}

#[component]
pub fn CardContent(children: Element) -> Element {
    rsx! {
        div { class: "card-content", {children} }
    }
}

/// Dashboard tile: a label over a large value, with an optional caption.
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] caption: Option<String>,
    /// Accent colour key: `primary`, `success`, `warning` or `danger`.
    #[props(default = "primary".to_string())]
    accent: String,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-card", "data-accent": "{accent}",
            span { class: "stat-card-label", "{label}" }
            span { class: "stat-card-value", "{value}" }
            if let Some(text) = caption {
                span { class: "stat-card-caption", "{text}" }
            }
        }
    }
}
