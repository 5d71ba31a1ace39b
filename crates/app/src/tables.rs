//! Column sets and row builders shared by the pages that list attendance
//! records and students.

use dioxus::prelude::*;
use shared_types::{AttendanceRecord, AttendanceStanding, AttendanceStatus, StudentWithUser};
use shared_ui::{Badge, BadgeTone, CellValue, ColumnDef, Row};
use std::collections::HashMap;

use crate::format_helpers::{format_date_human, format_datetime_human};

/// Upper bound used when the pages fetch the whole directory or record set.
pub const FETCH_LIMIT: u32 = 500;

/// Students by primary key, for resolving `AttendanceRecord::student_id`.
pub type StudentIndex = HashMap<i64, StudentWithUser>;

pub fn index_students(students: Vec<StudentWithUser>) -> StudentIndex {
    students.into_iter().map(|s| (s.id, s)).collect()
}

pub fn status_tone(status: AttendanceStatus) -> BadgeTone {
    match status {
        AttendanceStatus::Present => BadgeTone::Success,
        AttendanceStatus::Absent => BadgeTone::Danger,
        AttendanceStatus::Late => BadgeTone::Warning,
    }
}

pub fn standing_tone(standing: AttendanceStanding) -> BadgeTone {
    match standing {
        AttendanceStanding::Good => BadgeTone::Success,
        AttendanceStanding::Warning => BadgeTone::Warning,
        AttendanceStanding::Danger => BadgeTone::Danger,
    }
}

fn status_cell(value: &CellValue, _row: &Row) -> Element {
    let status = AttendanceStatus::from_str_or_default(&value.display());
    rsx! {
        Badge { tone: status_tone(status), dot: true, "{status.display_name()}" }
    }
}

/// Shows the human date kept in `date_label`; the cell itself holds a
/// sortable `YYYY-MM-DD HH:MM` string.
fn date_cell(value: &CellValue, row: &Row) -> Element {
    let label = match row.get("date_label") {
        CellValue::Null => value.display(),
        label => label.display(),
    };
    rsx! { span { class: "date-cell", "{label}" } }
}

/// Date, subject, (student, roll number), status.
pub fn record_columns(with_student: bool) -> Vec<ColumnDef> {
    let mut columns = vec![
        ColumnDef::new("class_date", "Date").sortable().render(date_cell),
        ColumnDef::new("subject", "Subject").sortable(),
    ];
    if with_student {
        columns.push(ColumnDef::new("student_name", "Student Name").sortable());
        columns.push(ColumnDef::new("roll_number", "Student ID").sortable());
    }
    columns.push(ColumnDef::new("status", "Status").sortable().render(status_cell));
    columns
}

pub fn record_row(record: &AttendanceRecord, students: &StudentIndex) -> Row {
    let student = students.get(&record.student_id);
    Row::new()
        .cell("id", record.id)
        .cell(
            "class_date",
            record.class_date.format("%Y-%m-%d %H:%M").to_string(),
        )
        .cell("date_label", format_datetime_human(record.class_date))
        .cell(
            "subject",
            record
                .subject
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("General"),
        )
        .cell(
            "student_name",
            student
                .map(|s| s.display_name().to_string())
                .unwrap_or_else(|| "Unknown Student".to_string()),
        )
        .cell(
            "roll_number",
            student
                .map(|s| s.student_id.clone())
                .unwrap_or_else(|| record.student_id.to_string()),
        )
        .cell("status", record.status.as_str())
}

/// Records newest first by class date.
pub fn newest_first(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| b.class_date.cmp(&a.class_date));
}

/// Row for the student directory. `semester` is numeric so it sorts as a number.
pub fn student_row(student: &StudentWithUser) -> Row {
    Row::new()
        .cell("id", student.id)
        .cell("name", student.display_name())
        .cell("roll_number", student.student_id.as_str())
        .cell("email", student.email.as_str())
        .cell("department", student.department.clone())
        .cell("semester", student.year)
        .cell(
            "joined",
            student
                .created_at
                .map(|at| format_date_human(at.date()))
                .unwrap_or_default(),
        )
}
