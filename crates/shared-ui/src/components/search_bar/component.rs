use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSearch;
use dioxus_free_icons::Icon;

/// Free-text search input with a leading icon. Emits the raw input on every keystroke.
#[component]
pub fn SearchBox(
    #[props(default)] value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "search-box",
            span { class: "search-box-icon",
                Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
            }
            input {
                class: "search-box-input",
                r#type: "text",
                value: value,
                placeholder: placeholder,
                oninput: move |evt| on_search.call(evt.value()),
            }
        }
    }
}
