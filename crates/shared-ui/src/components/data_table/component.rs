use dioxus::prelude::*;

use super::view::{ColumnDef, Row, TableViewState, ViewOptions};
use crate::components::pagination::PageControls;
use crate::components::search_bar::SearchBox;

/// Searchable, sortable, paginated table over a list of [`Row`]s.
///
/// Search, sort and page live in local state and are lost on unmount. The
/// caller's rows are never modified; a changed `data` prop is re-projected on
/// the next render with the current page clamped into range. `initial_page`
/// only seeds the page on mount.
#[component]
pub fn TabularView(
    columns: Vec<ColumnDef>,
    data: Vec<Row>,
    #[props(default = true)] searchable: bool,
    #[props(default = true)] pagination: bool,
    #[props(default = 10)] items_per_page: usize,
    #[props(default = "No data available".to_string())] empty_message: String,
    #[props(default = 1)] initial_page: usize,
) -> Element {
    let mut state = use_signal(move || {
        let mut state = TableViewState::default();
        state.go_to_page(initial_page);
        state
    });
    let options = ViewOptions {
        searchable,
        pagination,
        items_per_page,
    };

    let current = state.read().clone();
    let projection = current.project(&columns, &data, &options);
    let total_pages = projection.total_pages;
    let shown_page = projection.page;
    let column_count = columns.len().max(1);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "tabular-view",
            if searchable {
                SearchBox {
                    value: current.search.clone(),
                    on_search: move |term: String| state.write().set_search(term),
                }
            }

            div { class: "data-table",
                table {
                    thead {
                        tr {
                            {columns.iter().map(|col| {
                                let column = col.clone();
                                let indicator = match &current.sort.key {
                                    Some(key) if *key == col.key => current.sort.direction.indicator(),
                                    _ => "",
                                };
                                rsx! {
                                    th {
                                        key: "{col.key}",
                                        class: if col.sortable { "sortable" } else { "" },
                                        onclick: move |_| state.write().toggle_sort(&column),
                                        "{col.label}{indicator}"
                                    }
                                }
                            })}
                        }
                    }
                    tbody {
                        if projection.is_empty() {
                            tr { class: "data-table-empty",
                                td { colspan: "{column_count}", "{empty_message}" }
                            }
                        } else {
                            {projection.rows.iter().map(|&index| {
                                let row = &data[index];
                                rsx! {
                                    tr { key: "{index}", class: "data-table-row",
                                        {columns.iter().map(|col| {
                                            let value = row.get(&col.key);
                                            match &col.render {
                                                Some(render) => rsx! {
                                                    td { key: "{col.key}", {render(value, row)} }
                                                },
                                                None => rsx! {
                                                    td { key: "{col.key}", "{value}" }
                                                },
                                            }
                                        })}
                                    }
                                }
                            })}
                        }
                    }
                }
            }

            if projection.shows_controls(&options) {
                PageControls {
                    summary: projection.summary(&options),
                    page: projection.page,
                    total_pages,
                    on_page: move |page: usize| state.write().go_to_page(page),
                    on_previous: move |_| state.write().previous_page(shown_page),
                    on_next: move |_| state.write().next_page(shown_page, total_pages),
                }
            }
        }
    }
}
