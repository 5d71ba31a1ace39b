use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdChevronLeft, LdChevronRight};
use dioxus_free_icons::Icon;

use crate::components::button::{Button, ButtonSize, ButtonVariant};

/// Numbered page controls with Previous/Next buttons and a "Showing X to Y" summary.
///
/// `page` is 1-based. Previous is disabled on the first page and Next on the last.
#[component]
pub fn PageControls(
    summary: String,
    page: usize,
    total_pages: usize,
    on_page: EventHandler<usize>,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "pagination",
            span { class: "pagination-info", "{summary}" }
            div { class: "pagination-buttons",
                Button {
                    variant: ButtonVariant::Outline,
                    size: ButtonSize::Small,
                    disabled: page <= 1,
                    onclick: move |_| on_previous.call(()),
                    Icon::<LdChevronLeft> { icon: LdChevronLeft, width: 14, height: 14 }
                    "Previous"
                }
                for number in 1..=total_pages {
                    button {
                        key: "{number}",
                        r#type: "button",
                        class: "button pagination-page",
                        "data-style": "outline",
                        "data-size": "sm",
                        "data-active": if number == page { "true" } else { "false" },
                        onclick: move |_| on_page.call(number),
                        "{number}"
                    }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    size: ButtonSize::Small,
                    disabled: page >= total_pages,
                    onclick: move |_| on_next.call(()),
                    "Next"
                    Icon::<LdChevronRight> { icon: LdChevronRight, width: 14, height: 14 }
                }
            }
        }
    }
}
