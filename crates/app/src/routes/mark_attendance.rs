use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdSend;
use dioxus_free_icons::Icon;
use shared_types::{
    AttendanceStatus, MarkAttendanceRequest, StudentWithUser, ALL_STATUSES, DEPARTMENTS,
    SEMESTERS, SUBJECTS,
};
use shared_ui::{
    Alert, AlertKind, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CellValue,
    ColumnDef, PageHeader, Row, SelectField, SelectOption, TabularView,
};
use std::collections::HashMap;

use crate::auth::{use_api, use_auth};
use crate::tables::{student_row, FETCH_LIMIT};

const MANUAL_REMARK: &str = "Manual entry";

/// Status chosen per student. Students never touched count as present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceSheet {
    statuses: HashMap<i64, AttendanceStatus>,
}

impl AttendanceSheet {
    pub fn status(&self, student_id: i64) -> AttendanceStatus {
        self.statuses.get(&student_id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, student_id: i64, status: AttendanceStatus) {
        self.statuses.insert(student_id, status);
    }

    pub fn mark_all(&mut self, student_ids: impl IntoIterator<Item = i64>, status: AttendanceStatus) {
        for id in student_ids {
            self.set(id, status);
        }
    }

    /// One request per listed student, or the message to show instead.
    pub fn requests(
        &self,
        students: &[StudentWithUser],
        subject: &str,
        marked_by: i64,
    ) -> Result<Vec<MarkAttendanceRequest>, String> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err("Please select a subject".to_string());
        }
        if students.is_empty() {
            return Err("No students match the selected filters".to_string());
        }
        Ok(students
            .iter()
            .map(|s| MarkAttendanceRequest {
                student_id: s.id,
                subject: subject.to_string(),
                status: self.status(s.id),
                marked_by,
                remarks: Some(MANUAL_REMARK.to_string()),
            })
            .collect())
    }
}

/// Department and semester filters; blank values keep everyone.
pub fn filter_roster(
    students: &[StudentWithUser],
    department: &str,
    semester: &str,
) -> Vec<StudentWithUser> {
    let year = semester.parse::<i64>().ok();
    students
        .iter()
        .filter(|s| s.matches_filters(Some(department), year))
        .cloned()
        .collect()
}

fn roster_columns(sheet: Signal<AttendanceSheet>) -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("roll_number", "Roll Number").sortable(),
        ColumnDef::new("name", "Name").sortable(),
        ColumnDef::new("department", "Department"),
        ColumnDef::new("status", "Status").render(move |_value: &CellValue, row: &Row| {
            let CellValue::Int(id) = *row.get("id") else {
                return rsx! {};
            };
            let current = sheet.read().status(id);
            let mut sheet = sheet;
            rsx! {
                div { class: "status-options", role: "radiogroup",
                    for status in ALL_STATUSES.iter().copied() {
                        button {
                            key: "{status}",
                            r#type: "button",
                            class: "status-option",
                            "data-status": status.as_str(),
                            "data-selected": if status == current { "true" } else { "false" },
                            onclick: move |_| sheet.write().set(id, status),
                            "{status.display_name()}"
                        }
                    }
                }
            }
        }),
    ]
}

/// Manual attendance for a filtered group of students.
#[component]
pub fn MarkAttendance() -> Element {
    let mut auth = use_auth();
    let api = use_api();
    let mut subject = use_signal(String::new);
    let mut department = use_signal(String::new);
    let mut semester = use_signal(String::new);
    let sheet = use_signal(AttendanceSheet::default);
    let mut error_msg = use_signal(String::new);
    let mut success_msg = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let list_api = api.clone();
    let students = use_resource(move || {
        let api = list_api.clone();
        async move {
            api.list_students(0, FETCH_LIMIT)
                .await
                .map_err(|e| auth.report(&e))
        }
    });

    let roster = match &*students.read() {
        Some(Ok(list)) => filter_roster(list, &department(), &semester()),
        _ => Vec::new(),
    };
    let roster_ids: Vec<i64> = roster.iter().map(|s| s.id).collect();
    let roster_len = roster.len();
    let rows: Vec<Row> = roster.iter().map(student_row).collect();
    let tally = {
        let sheet = sheet.read();
        let mut tally = shared_types::AttendanceTally::default();
        for id in &roster_ids {
            tally.add(sheet.status(*id));
        }
        tally
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let marked_by = auth.user().map(|u| u.id).unwrap_or_default();
        let requests = match sheet.read().requests(&roster, &subject(), marked_by) {
            Ok(requests) => requests,
            Err(message) => {
                error_msg.set(message);
                return;
            }
        };
        let api = api.clone();
        spawn(async move {
            submitting.set(true);
            error_msg.set(String::new());
            success_msg.set(String::new());
            match api.mark_attendance_batch(&requests).await {
                Ok(records) => {
                    success_msg.set(format!(
                        "Attendance submitted for {} students in {}.",
                        records.len(),
                        subject()
                    ));
                }
                Err(e) => {
                    let message = auth.report(&e);
                    error_msg.set(format!("Failed to submit attendance: {message}"));
                }
            }
            submitting.set(false);
        });
    };

    let nobody_listed = roster_ids.is_empty();
    let mark_all = move |status: AttendanceStatus| {
        let ids = roster_ids.clone();
        let mut sheet = sheet;
        move |_: MouseEvent| sheet.write().mark_all(ids.clone(), status)
    };

    let subject_options: Vec<SelectOption> = SUBJECTS.iter().map(|s| SelectOption::plain(*s)).collect();
    let department_options: Vec<SelectOption> =
        DEPARTMENTS.iter().map(|d| SelectOption::plain(*d)).collect();
    let semester_options: Vec<SelectOption> = SEMESTERS
        .iter()
        .map(|(value, label)| SelectOption::new(value.to_string(), *label))
        .collect();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./attendance.css") }

        PageHeader {
            title: "Mark Attendance",
            subtitle: "Manually record attendance for your class",
        }

        Alert {
            kind: AlertKind::Success,
            message: success_msg(),
            on_dismiss: move |_| success_msg.set(String::new()),
        }
        Alert { message: error_msg() }

        form { onsubmit: handle_submit,
            Card { class: "section",
                CardContent {
                    div { class: "filter-bar",
                        SelectField {
                            label: "Subject",
                            value: subject(),
                            options: subject_options,
                            placeholder: "Select subject",
                            on_change: move |v: String| subject.set(v),
                        }
                        SelectField {
                            label: "Department",
                            value: department(),
                            options: department_options,
                            placeholder: "All departments",
                            on_change: move |v: String| department.set(v),
                        }
                        SelectField {
                            label: "Semester",
                            value: semester(),
                            options: semester_options,
                            placeholder: "All semesters",
                            on_change: move |v: String| semester.set(v),
                        }
                    }
                }
            }

            Card { class: "section",
                CardHeader {
                    title: format!("Students ({roster_len})"),
                    actions: rsx! {
                        div { class: "mark-all",
                            Button {
                                variant: ButtonVariant::Success,
                                size: ButtonSize::Small,
                                onclick: mark_all(AttendanceStatus::Present),
                                "All Present"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                size: ButtonSize::Small,
                                onclick: mark_all(AttendanceStatus::Absent),
                                "All Absent"
                            }
                            Button {
                                variant: ButtonVariant::Outline,
                                size: ButtonSize::Small,
                                onclick: mark_all(AttendanceStatus::Late),
                                "All Late"
                            }
                        }
                    },
                }
                CardContent {
                    match &*students.read() {
                        Some(Err(message)) => rsx! {
                            Alert { message: message.clone() }
                        },
                        None => rsx! {
                            p { class: "loading-text", "Loading students..." }
                        },
                        Some(Ok(_)) => rsx! {
                            TabularView {
                                columns: roster_columns(sheet),
                                data: rows.clone(),
                                searchable: false,
                                pagination: false,
                                empty_message: "No students match the selected filters",
                            }
                        },
                    }
                }
            }

            div { class: "submit-bar",
                span { class: "submit-summary",
                    "Present: {tally.present} · Absent: {tally.absent} · Late: {tally.late}"
                }
                Button {
                    button_type: "submit",
                    loading: submitting(),
                    disabled: nobody_listed,
                    Icon::<LdSend> { icon: LdSend, width: 16, height: 16 }
                    if submitting() { "Submitting..." } else { "Submit Attendance" }
                }
            }
        }
    }
}
