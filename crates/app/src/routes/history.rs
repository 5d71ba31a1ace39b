use dioxus::prelude::*;
use shared_types::{AppConfig, AttendanceTally};
use shared_ui::{Alert, Card, CardContent, CardHeader, PageHeader, StatCard, TabularView};

use crate::auth::{use_api, use_auth};
use crate::format_helpers::format_percentage;
use crate::routes::dashboard::{load_own_attendance, OwnAttendance};
use crate::tables::{record_columns, record_row, StudentIndex};

/// Every attendance entry of the signed-in student, searchable and sortable.
#[component]
pub fn AttendanceHistory() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let config = use_context::<AppConfig>();
    let user_id = auth.user().map(|u| u.id).unwrap_or_default();

    let data = use_resource(move || {
        let api = api.clone();
        async move {
            load_own_attendance(&api, user_id)
                .await
                .map_err(|e| auth.report(&e))
        }
    });

    rsx! {
        PageHeader {
            title: "Attendance History",
            subtitle: "All of your recorded classes",
        }

        match &*data.read() {
            Some(Ok(own)) => rsx! {
                HistoryTable { own: own.clone(), items_per_page: config.table.items_per_page }
            },
            Some(Err(message)) => rsx! {
                Alert { message: message.clone() }
            },
            None => rsx! {
                p { class: "loading-text", "Loading history..." }
            },
        }
    }
}

#[component]
fn HistoryTable(own: OwnAttendance, items_per_page: usize) -> Element {
    // Records are the student's own, so the name columns are left out.
    let no_students = StudentIndex::new();
    let rows: Vec<_> = own.records.iter().map(|r| record_row(r, &no_students)).collect();
    let tally = AttendanceTally::from_records(&own.records);

    rsx! {
        div { class: "stats-grid",
            StatCard { label: "Classes", value: tally.total().to_string() }
            StatCard {
                label: "Present",
                value: tally.present.to_string(),
                caption: format!("{}% of classes", tally.share(tally.present)),
                accent: "success",
            }
            StatCard {
                label: "Absent",
                value: tally.absent.to_string(),
                caption: format!("{}% of classes", tally.share(tally.absent)),
                accent: "danger",
            }
            StatCard {
                label: "Late",
                value: tally.late.to_string(),
                caption: format!("Attendance {}", format_percentage(tally.percentage())),
                accent: "warning",
            }
        }

        Card { class: "section",
            CardHeader { title: format!("{} · {}", own.student.display_name(), own.student.student_id) }
            CardContent {
                TabularView {
                    columns: record_columns(false),
                    data: rows,
                    items_per_page,
                    empty_message: "No attendance recorded yet",
                }
            }
        }
    }
}
