use dioxus::prelude::*;

/// One entry of a [`SelectField`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose value doubles as its label.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// A native select built from a list of options.
///
/// `placeholder`, when set, becomes a leading option with an empty value so
/// "nothing chosen" stays selectable (used for "All subjects" style filters).
#[component]
pub fn SelectField(
    #[props(default)] value: String,
    options: Vec<SelectOption>,
    #[props(default)] on_change: EventHandler<String>,
    #[props(default)] label: String,
    #[props(default)] placeholder: Option<String>,
    #[props(default = false)] disabled: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    let error = error.filter(|e| !e.is_empty());

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label", "{label}" }
            }
            select {
                class: "form-select",
                value: value.clone(),
                disabled: disabled,
                onchange: move |evt| on_change.call(evt.value()),
                if let Some(text) = placeholder {
                    option { value: "", selected: value.is_empty(), "{text}" }
                }
                for opt in options.iter() {
                    option {
                        key: "{opt.value}",
                        value: "{opt.value}",
                        selected: opt.value == value,
                        "{opt.label}"
                    }
                }
            }
            if let Some(message) = error {
                span { class: "form-select-error", "{message}" }
            }
        }
    }
}
