mod admin;
mod student;
mod teacher;

pub use admin::AdminDashboard;
pub use student::StudentDashboard;
pub(crate) use student::{load_own_attendance, OwnAttendance};
pub use teacher::TeacherDashboard;

use chrono::NaiveDate;
use client::ApiClient;
use shared_types::{
    defaulters, AppError, AttendanceQuery, AttendanceRecord, AttendanceTally, AttendanceThresholds,
    StudentWithUser,
};

use crate::tables::FETCH_LIMIT;

/// Headline numbers for the staff dashboards.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceOverview {
    pub total_students: usize,
    pub total_records: usize,
    pub records_today: usize,
    /// Present share over every record, in percent.
    pub average_attendance: f64,
    pub defaulters: usize,
}

impl AttendanceOverview {
    pub fn compute(
        students: &[StudentWithUser],
        records: &[AttendanceRecord],
        thresholds: &AttendanceThresholds,
        today: NaiveDate,
    ) -> Self {
        Self {
            total_students: students.len(),
            total_records: records.len(),
            records_today: records.iter().filter(|r| r.class_day() == today).count(),
            average_attendance: AttendanceTally::from_records(records).percentage(),
            defaulters: defaulters(records, thresholds).len(),
        }
    }
}

/// Directory and record set, newest records first.
pub(crate) async fn load_directory_and_records(
    api: &ApiClient,
) -> Result<(Vec<StudentWithUser>, Vec<AttendanceRecord>), AppError> {
    let (students, mut records) = futures::try_join!(
        api.list_students(0, FETCH_LIMIT),
        api.list_attendance(&AttendanceQuery::default().limit(FETCH_LIMIT)),
    )?;
    crate::tables::newest_first(&mut records);
    Ok((students, records))
}
