use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdUsers;
use dioxus_free_icons::Icon;
use shared_types::AppConfig;
use shared_ui::{Alert, Button, ButtonVariant, Card, CardContent, CardHeader, PageHeader, StatCard, TabularView};

use super::{load_directory_and_records, AttendanceOverview};
use crate::auth::{use_api, use_auth};
use crate::format_helpers::format_percentage;
use crate::routes::Route;
use crate::tables::{index_students, record_columns, record_row};

const RECENT_RECORDS: usize = 10;

/// Institution-wide numbers plus the latest attendance entries.
#[component]
pub fn AdminDashboard() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let config = use_context::<AppConfig>();

    let data = use_resource(move || {
        let api = api.clone();
        async move {
            load_directory_and_records(&api)
                .await
                .map_err(|e| auth.report(&e))
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        PageHeader {
            title: "Admin Dashboard",
            subtitle: "Manage your institution's attendance system",
            actions: rsx! {
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| { navigator().push(Route::StudentDirectory {}); },
                    Icon::<LdUsers> { icon: LdUsers, width: 16, height: 16 }
                    "Manage Students"
                }
            },
        }

        match &*data.read() {
            Some(Ok((students, records))) => {
                let overview = AttendanceOverview::compute(
                    students,
                    records,
                    &config.attendance,
                    chrono::Local::now().date_naive(),
                );
                let index = index_students(students.clone());
                let recent: Vec<_> = records
                    .iter()
                    .take(RECENT_RECORDS)
                    .map(|r| record_row(r, &index))
                    .collect();
                let average_accent = if overview.average_attendance >= config.attendance.minimum {
                    "success"
                } else {
                    "danger"
                };
                rsx! {
                    div { class: "stats-grid",
                        StatCard { label: "Total Students", value: overview.total_students.to_string() }
                        StatCard {
                            label: "Attendance Records",
                            value: overview.total_records.to_string(),
                            caption: format!("{} today", overview.records_today),
                        }
                        StatCard {
                            label: "Average Attendance",
                            value: format_percentage(overview.average_attendance),
                            accent: average_accent,
                        }
                        StatCard {
                            label: "Defaulters",
                            value: overview.defaulters.to_string(),
                            caption: format!("Below {}", format_percentage(config.attendance.minimum)),
                            accent: "warning",
                        }
                    }

                    Card { class: "section",
                        CardHeader { title: "Recent records" }
                        CardContent {
                            TabularView {
                                columns: record_columns(true),
                                data: recent,
                                searchable: false,
                                pagination: false,
                                empty_message: "No attendance has been recorded yet",
                            }
                        }
                    }
                }
            }
            Some(Err(message)) => rsx! {
                Alert { message: message.clone() }
            },
            None => rsx! {
                p { class: "loading-text", "Loading dashboard..." }
            },
        }
    }
}
