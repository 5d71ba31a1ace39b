use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdRotateCcw;
use dioxus_free_icons::Icon;
use shared_types::{AppConfig, AttendanceRecord, AttendanceTally, SUBJECTS};
use shared_ui::{
    Alert, Button, ButtonVariant, Card, CardContent, PageHeader, SelectField, SelectOption,
    StatCard, TabularView, TextField,
};

use super::dashboard::load_directory_and_records;
use crate::auth::{use_api, use_auth};
use crate::format_helpers::parse_date_input;
use crate::tables::{index_students, record_columns, record_row};

/// Records on `day` (when set) for `subject` (when non-empty).
pub fn filter_records<'a>(
    records: &'a [AttendanceRecord],
    day: Option<NaiveDate>,
    subject: &str,
) -> Vec<&'a AttendanceRecord> {
    records
        .iter()
        .filter(|r| r.matches(day, Some(subject)))
        .collect()
}

/// Browse all attendance with date and subject filters.
#[component]
pub fn ViewAttendance() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let config = use_context::<AppConfig>();
    let mut date_filter = use_signal(String::new);
    let mut subject_filter = use_signal(String::new);

    let data = use_resource(move || {
        let api = api.clone();
        async move {
            load_directory_and_records(&api)
                .await
                .map_err(|e| auth.report(&e))
        }
    });

    let subject_options: Vec<SelectOption> =
        SUBJECTS.iter().map(|s| SelectOption::plain(*s)).collect();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./attendance.css") }

        PageHeader {
            title: "View Attendance",
            subtitle: "Browse and filter attendance records",
        }

        Card { class: "section",
            CardContent {
                div { class: "filter-bar",
                    TextField {
                        label: "Filter by Date",
                        input_type: "date",
                        value: date_filter(),
                        on_input: move |v: String| date_filter.set(v),
                    }
                    SelectField {
                        label: "Filter by Subject",
                        value: subject_filter(),
                        options: subject_options,
                        placeholder: "All Subjects",
                        on_change: move |v: String| subject_filter.set(v),
                    }
                    div { class: "filter-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| {
                                date_filter.set(String::new());
                                subject_filter.set(String::new());
                            },
                            Icon::<LdRotateCcw> { icon: LdRotateCcw, width: 16, height: 16 }
                            "Clear Filters"
                        }
                    }
                }
            }
        }

        match &*data.read() {
            Some(Ok((students, records))) => {
                let day = parse_date_input(&date_filter());
                let subject = subject_filter();
                let visible = filter_records(records, day, &subject);
                let tally = AttendanceTally::from_records(visible.iter().copied());
                let index = index_students(students.clone());
                let rows: Vec<_> = visible.iter().map(|r| record_row(r, &index)).collect();
                rsx! {
                    div { class: "stats-grid",
                        StatCard { label: "Records", value: tally.total().to_string() }
                        StatCard {
                            label: "Present",
                            value: tally.present.to_string(),
                            caption: format!("{}%", tally.share(tally.present)),
                            accent: "success",
                        }
                        StatCard {
                            label: "Absent",
                            value: tally.absent.to_string(),
                            caption: format!("{}%", tally.share(tally.absent)),
                            accent: "danger",
                        }
                        StatCard {
                            label: "Late",
                            value: tally.late.to_string(),
                            caption: format!("{}%", tally.share(tally.late)),
                            accent: "warning",
                        }
                    }

                    Card { class: "section",
                        CardContent {
                            TabularView {
                                columns: record_columns(true),
                                data: rows,
                                items_per_page: config.table.items_per_page,
                                empty_message: "No attendance records found for current filters.",
                            }
                        }
                    }
                }
            }
            Some(Err(message)) => rsx! {
                Alert { message: message.clone() }
            },
            None => rsx! {
                p { class: "loading-text", "Loading records..." }
            },
        }
    }
}
