use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClipboardCheck, LdEye};
use dioxus_free_icons::Icon;
use shared_types::{AppConfig, AttendanceRecord, AttendanceStanding, AttendanceTally};
use shared_ui::{Alert, Badge, Card, CardContent, CardHeader, PageHeader, StatCard};
use std::collections::BTreeMap;

use super::{load_directory_and_records, AttendanceOverview};
use crate::auth::{use_api, use_auth};
use crate::format_helpers::{format_date_human, format_percentage};
use crate::routes::Route;
use crate::tables::standing_tone;

const RECENT_CLASSES: usize = 5;

/// One subject taught on one day, with its tally.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSession {
    pub day: NaiveDate,
    pub subject: String,
    pub tally: AttendanceTally,
}

/// Group records into class sessions, most recent day first, subjects
/// alphabetical within a day.
pub fn class_sessions(records: &[AttendanceRecord]) -> Vec<ClassSession> {
    let mut grouped: BTreeMap<(NaiveDate, String), AttendanceTally> = BTreeMap::new();
    for record in records {
        let subject = record
            .subject
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "General".to_string());
        grouped
            .entry((record.class_day(), subject))
            .or_default()
            .add(record.status);
    }

    let mut sessions: Vec<ClassSession> = grouped
        .into_iter()
        .map(|((day, subject), tally)| ClassSession { day, subject, tally })
        .collect();
    sessions.sort_by(|a, b| b.day.cmp(&a.day));
    sessions
}

#[component]
pub fn TeacherDashboard() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let config = use_context::<AppConfig>();
    let name = auth.user().map(|u| u.name).unwrap_or_default();

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
            title: format!("Welcome, {name}!"),
            subtitle: "Manage your classes and track attendance",
        }

        match &*data.read() {
            Some(Ok((students, records))) => {
                let overview = AttendanceOverview::compute(
                    students,
                    records,
                    &config.attendance,
                    chrono::Local::now().date_naive(),
                );
                let sessions = class_sessions(records);
                rsx! {
                    div { class: "stats-grid",
                        StatCard { label: "Total Students", value: overview.total_students.to_string() }
                        StatCard {
                            label: "Marked Today",
                            value: overview.records_today.to_string(),
                            caption: "Attendance entries",
                            accent: "success",
                        }
                        StatCard {
                            label: "Average Attendance",
                            value: format_percentage(overview.average_attendance),
                        }
                        StatCard {
                            label: "Defaulters",
                            value: overview.defaulters.to_string(),
                            caption: format!("Below {}", format_percentage(config.attendance.minimum)),
                            accent: "danger",
                        }
                    }

                    div { class: "quick-actions",
                        Link { class: "quick-action-card", to: Route::MarkAttendance {},
                            div { class: "quick-action-icon",
                                Icon::<LdClipboardCheck> { icon: LdClipboardCheck, width: 22, height: 22 }
                            }
                            h3 { class: "quick-action-title", "Mark Attendance" }
                            p { class: "quick-action-description", "Record today's class for a group of students" }
                        }
                        Link { class: "quick-action-card", to: Route::ViewAttendance {},
                            div { class: "quick-action-icon",
                                Icon::<LdEye> { icon: LdEye, width: 22, height: 22 }
                            }
                            h3 { class: "quick-action-title", "View Attendance" }
                            p { class: "quick-action-description", "Browse and filter past records" }
                        }
                    }

                    Card { class: "section",
                        CardHeader { title: "Recent Classes" }
                        CardContent {
                            if sessions.is_empty() {
                                p { class: "empty-text", "No classes recorded yet." }
                            }
                            div { class: "session-list",
                                for session in sessions.iter().take(RECENT_CLASSES) {
                                    {
                                        let pct = session.tally.percentage();
                                        let standing = AttendanceStanding::classify(pct, &config.attendance);
                                        rsx! {
                                            div {
                                                key: "{session.day}-{session.subject}",
                                                class: "session-card",
                                                div { class: "session-info",
                                                    h3 { class: "session-subject", "{session.subject}" }
                                                    Badge { tone: standing_tone(standing), "{format_percentage(pct)}" }
                                                }
                                                div { class: "progress-bar",
                                                    div {
                                                        class: "progress-fill",
                                                        "data-standing": standing.as_str(),
                                                        style: "width: {pct}%",
                                                    }
                                                }
                                                p { class: "session-meta",
                                                    "Present: {session.tally.present} · Absent: {session.tally.absent} · Late: {session.tally.late} · {format_date_human(session.day)}"
                                                }
                                            }
                                        }
                                    }
                                }
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
