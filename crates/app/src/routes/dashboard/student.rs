use client::ApiClient;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdCircleCheck, LdCircleX, LdClock};
use dioxus_free_icons::Icon;
use shared_types::{
    subject_breakdown, AppConfig, AppError, AttendanceQuery, AttendanceRecord, AttendanceStanding,
    AttendanceStatus, StudentStats, StudentWithUser,
};
use shared_ui::{Alert, AlertKind, Badge, Card, CardContent, CardHeader, PageHeader, StatCard};

use crate::auth::{use_api, use_auth};
use crate::format_helpers::{format_date_human, format_percentage};
use crate::tables::{newest_first, standing_tone, status_tone, FETCH_LIMIT};

const RECENT_RECORDS: usize = 5;

/// A student's own record, stats and attendance (newest first).
#[derive(Debug, Clone, PartialEq)]
pub struct OwnAttendance {
    pub student: StudentWithUser,
    pub stats: StudentStats,
    pub records: Vec<AttendanceRecord>,
}

/// The directory entry belonging to the signed-in user.
pub fn find_own_student(students: Vec<StudentWithUser>, user_id: i64) -> Option<StudentWithUser> {
    students.into_iter().find(|s| s.user_id == user_id)
}

pub(crate) async fn load_own_attendance(
    api: &ApiClient,
    user_id: i64,
) -> Result<OwnAttendance, AppError> {
    let students = api.list_students(0, FETCH_LIMIT).await?;
    let student = find_own_student(students, user_id)
        .ok_or_else(|| AppError::not_found("No student record is linked to your account"))?;

    let (stats, mut records) = futures::try_join!(
        api.student_stats(student.id),
        api.list_attendance(&AttendanceQuery::for_student(student.id).limit(FETCH_LIMIT)),
    )?;
    newest_first(&mut records);
    Ok(OwnAttendance {
        student,
        stats,
        records,
    })
}

fn standing_caption(standing: AttendanceStanding) -> &'static str {
    match standing {
        AttendanceStanding::Good => "Good standing",
        AttendanceStanding::Warning => "Close to the minimum",
        AttendanceStanding::Danger => "Below minimum requirement",
    }
}

fn status_icon(status: AttendanceStatus) -> Element {
    match status {
        AttendanceStatus::Present => rsx! {
            Icon::<LdCircleCheck> { class: "recent-icon success", icon: LdCircleCheck, width: 18, height: 18 }
        },
        AttendanceStatus::Absent => rsx! {
            Icon::<LdCircleX> { class: "recent-icon danger", icon: LdCircleX, width: 18, height: 18 }
        },
        AttendanceStatus::Late => rsx! {
            Icon::<LdClock> { class: "recent-icon warning", icon: LdClock, width: 18, height: 18 }
        },
    }
}

#[component]
pub fn StudentDashboard() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let config = use_context::<AppConfig>();
    let user = auth.user();
    let user_id = user.as_ref().map(|u| u.id).unwrap_or_default();
    let name = user.map(|u| u.name).unwrap_or_default();

    let data = use_resource(move || {
        let api = api.clone();
        async move {
            load_own_attendance(&api, user_id)
                .await
                .map_err(|e| auth.report(&e))
        }
    });

    let thresholds = config.attendance;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        PageHeader {
            title: format!("Welcome back, {name}!"),
            subtitle: "Track your attendance and academic progress",
        }

        match &*data.read() {
            Some(Ok(own)) => {
                let overall = own.stats.attendance_percentage;
                let standing = AttendanceStanding::classify(overall, &thresholds);
                let subjects = subject_breakdown(&own.records);
                rsx! {
                    div { class: "stats-grid",
                        StatCard {
                            label: "Overall Attendance",
                            value: format_percentage(overall),
                            caption: standing_caption(standing),
                            accent: standing_tone(standing).as_str(),
                        }
                        StatCard { label: "Total Classes", value: own.stats.total_classes.to_string() }
                        StatCard { label: "Present", value: own.stats.present.to_string(), accent: "success" }
                        StatCard {
                            label: "Absent",
                            value: own.stats.absent.to_string(),
                            caption: format!("Late: {}", own.stats.late),
                            accent: "danger",
                        }
                    }

                    div { class: "dashboard-grid",
                        Card { class: "section",
                            CardHeader { title: "Subject-wise Attendance" }
                            CardContent {
                                if subjects.is_empty() {
                                    p { class: "empty-text", "No classes recorded yet." }
                                }
                                div { class: "session-list",
                                    for (subject, tally) in subjects.iter() {
                                        {
                                            let pct = tally.percentage();
                                            let subject_standing = AttendanceStanding::classify(pct, &thresholds);
                                            rsx! {
                                                div { key: "{subject}", class: "session-card",
                                                    div { class: "session-info",
                                                        h3 { class: "session-subject", "{subject}" }
                                                        span { class: "session-percentage", "data-standing": subject_standing.as_str(),
                                                            "{format_percentage(pct)}"
                                                        }
                                                    }
                                                    div { class: "progress-bar",
                                                        div {
                                                            class: "progress-fill",
                                                            "data-standing": subject_standing.as_str(),
                                                            style: "width: {pct}%",
                                                        }
                                                    }
                                                    p { class: "session-meta", "{standing_caption(subject_standing)}" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        Card { class: "section",
                            CardHeader { title: "Recent Attendance" }
                            CardContent {
                                if own.records.is_empty() {
                                    p { class: "empty-text", "No attendance recorded yet." }
                                }
                                ul { class: "recent-list",
                                    for record in own.records.iter().take(RECENT_RECORDS) {
                                        li { key: "{record.id}", class: "recent-item",
                                            {status_icon(record.status)}
                                            div { class: "recent-details",
                                                span { class: "recent-subject",
                                                    {record.subject.clone().unwrap_or_else(|| "General".to_string())}
                                                }
                                                span { class: "recent-date", "{format_date_human(record.class_day())}" }
                                            }
                                            Badge { tone: status_tone(record.status), "{record.status.display_name()}" }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    if overall < thresholds.minimum && own.stats.total_classes > 0 {
                        Alert {
                            kind: AlertKind::Error,
                            message: format!(
                                "Attendance alert: your attendance is below the minimum requirement of {}. Please improve your attendance to avoid academic penalties.",
                                format_percentage(thresholds.minimum)
                            ),
                        }
                    }
                }
            }
            Some(Err(message)) => rsx! {
                Alert { message: message.clone() }
            },
            None => rsx! {
                p { class: "loading-text", "Loading your attendance..." }
            },
        }
    }
}
