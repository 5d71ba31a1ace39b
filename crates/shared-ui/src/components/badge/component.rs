use dioxus::prelude::*;

/// Colour of a [`Badge`]. The same names double as stat card accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl BadgeTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeTone::Neutral => "neutral",
            BadgeTone::Info => "info",
            BadgeTone::Success => "success",
            BadgeTone::Warning => "warning",
            BadgeTone::Danger => "danger",
        }
    }
}

/// Rounded label for an attendance status, a standing or a role.
///
/// `dot` prefixes a small tone-coloured marker, used where badges sit in a
/// dense table column.
#[component]
pub fn Badge(
    #[props(default)] tone: BadgeTone,
    #[props(default)] dot: bool,
    #[props(default)] title: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        span {
            class: "badge",
            "data-tone": tone.as_str(),
            title: title,
            if dot {
                span { class: "badge-dot", "aria-hidden": "true" }
            }
            {children}
        }
    }
}
