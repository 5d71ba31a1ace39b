use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::AttendanceThresholds;

/// Status recorded for one student in one class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

pub const ALL_STATUSES: &[AttendanceStatus] = &[
    AttendanceStatus::Present,
    AttendanceStatus::Absent,
    AttendanceStatus::Late,
];

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "absent" => AttendanceStatus::Absent,
            "late" => AttendanceStatus::Late,
            _ => AttendanceStatus::Present,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attendance entry as returned by `/attendance/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub id: i64,
    /// Primary key of the student (not the roll number).
    pub student_id: i64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: AttendanceStatus,
    pub class_date: NaiveDateTime,
    pub marked_by: i64,
    pub marked_at: NaiveDateTime,
    #[serde(default)]
    pub confidence_score: Option<i64>,
}

impl AttendanceRecord {
    pub fn class_day(&self) -> NaiveDate {
        self.class_date.date()
    }

    /// Date + subject filter used by the view-attendance page. `None` accepts everything.
    pub fn matches(&self, day: Option<NaiveDate>, subject: Option<&str>) -> bool {
        if let Some(day) = day {
            if self.class_day() != day {
                return false;
            }
        }
        if let Some(subject) = subject.filter(|s| !s.is_empty()) {
            if self.subject.as_deref() != Some(subject) {
                return false;
            }
        }
        true
    }
}

/// Body for `POST /attendance/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkAttendanceRequest {
    pub student_id: i64,
    pub subject: String,
    pub status: AttendanceStatus,
    pub marked_by: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Query string for `GET /attendance/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceQuery {
    pub skip: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Default for AttendanceQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            student_id: None,
            start_date: None,
            end_date: None,
        }
    }
}

impl AttendanceQuery {
    pub fn for_student(student_id: i64) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Per-student statistics from `/attendance/student/{id}/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StudentStats {
    pub total_classes: u32,
    pub present: u32,
    pub absent: u32,
    #[serde(default)]
    pub late: u32,
    pub attendance_percentage: f64,
}

/// Counts of each status over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttendanceTally {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
}

impl AttendanceTally {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut tally = Self::default();
        for record in records {
            tally.add(record.status);
        }
        tally
    }

    pub fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.present + self.absent + self.late
    }

    /// `present / total * 100`, rounded to two decimals; 0 with no records.
    pub fn percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        round2(f64::from(self.present) / f64::from(total) * 100.0)
    }

    /// Share of `count` in the total, as a percentage with one decimal.
    pub fn share(&self, count: u32) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (f64::from(count) / f64::from(total) * 1000.0).round() / 10.0
    }

    pub fn into_stats(self) -> StudentStats {
        StudentStats {
            total_classes: self.total(),
            present: self.present,
            absent: self.absent,
            late: self.late,
            attendance_percentage: self.percentage(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// How an attendance percentage compares with the institution's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStanding {
    Good,
    Warning,
    Danger,
}

impl AttendanceStanding {
    /// `>= good` is Good, `>= minimum` is Warning, anything lower is Danger.
    pub fn classify(percentage: f64, thresholds: &AttendanceThresholds) -> Self {
        if percentage >= thresholds.good {
            AttendanceStanding::Good
        } else if percentage >= thresholds.minimum {
            AttendanceStanding::Warning
        } else {
            AttendanceStanding::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStanding::Good => "good",
            AttendanceStanding::Warning => "warning",
            AttendanceStanding::Danger => "danger",
        }
    }
}

/// Students whose attendance over `records` is below `thresholds.minimum`,
/// ordered by student id.
pub fn defaulters(
    records: &[AttendanceRecord],
    thresholds: &AttendanceThresholds,
) -> Vec<(i64, AttendanceTally)> {
    let mut per_student: BTreeMap<i64, AttendanceTally> = BTreeMap::new();
    for record in records {
        per_student
            .entry(record.student_id)
            .or_default()
            .add(record.status);
    }
    per_student
        .into_iter()
        .filter(|(_, tally)| tally.percentage() < thresholds.minimum)
        .collect()
}

/// Tally per subject, sorted by subject name. Records without a subject are
/// grouped under "General".
pub fn subject_breakdown(records: &[AttendanceRecord]) -> Vec<(String, AttendanceTally)> {
    let mut per_subject: BTreeMap<String, AttendanceTally> = BTreeMap::new();
    for record in records {
        let subject = record
            .subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("General");
        per_subject
            .entry(subject.to_string())
            .or_default()
            .add(record.status);
    }
    per_subject.into_iter().collect()
}
