use pretty_assertions::assert_eq;
use shared_types::{
    AttendanceQuery, AttendanceStanding, AttendanceStatus, AttendanceTally, AttendanceThresholds,
    MarkAttendanceRequest, StudentStats,
};

use crate::common::{self, ASHA_STUDENT_ID, RAVI_STUDENT_ID, TEACHER};

fn mark(student_id: i64, subject: &str, status: AttendanceStatus) -> MarkAttendanceRequest {
    MarkAttendanceRequest {
        student_id,
        subject: subject.into(),
        status,
        marked_by: 2,
        remarks: None,
    }
}

#[tokio::test]
async fn test_stats_for_student_without_records() {
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;

    let stats = teacher.student_stats(ASHA_STUDENT_ID).await.unwrap();

    assert_eq!(stats, StudentStats::default());
}

#[tokio::test]
async fn test_stats_match_local_tally() {
    use AttendanceStatus::*;
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;
    teacher
        .mark_attendance_batch(&[
            mark(ASHA_STUDENT_ID, "Physics", Present),
            mark(ASHA_STUDENT_ID, "Physics", Absent),
            mark(ASHA_STUDENT_ID, "English", Present),
            mark(ASHA_STUDENT_ID, "English", Late),
            mark(RAVI_STUDENT_ID, "English", Absent),
        ])
        .await
        .unwrap();

    let stats = teacher.student_stats(ASHA_STUDENT_ID).await.unwrap();
    assert_eq!(
        stats,
        StudentStats {
            total_classes: 4,
            present: 2,
            absent: 1,
            late: 1,
            attendance_percentage: 50.0,
        }
    );

    let records = teacher
        .list_attendance(&AttendanceQuery::for_student(ASHA_STUDENT_ID))
        .await
        .unwrap();
    assert_eq!(AttendanceTally::from_records(&records).into_stats(), stats);

    let breakdown = shared_types::subject_breakdown(&records);
    let subjects: Vec<&str> = breakdown.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(subjects, vec!["English", "Physics"]);

    assert_eq!(
        AttendanceStanding::classify(stats.attendance_percentage, &AttendanceThresholds::default()),
        AttendanceStanding::Danger
    );
}

#[tokio::test]
async fn test_defaulters_across_all_records() {
    use AttendanceStatus::*;
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;
    teacher
        .mark_attendance_batch(&[
            mark(ASHA_STUDENT_ID, "Physics", Present),
            mark(ASHA_STUDENT_ID, "Physics", Present),
            mark(RAVI_STUDENT_ID, "Physics", Absent),
            mark(RAVI_STUDENT_ID, "Physics", Present),
        ])
        .await
        .unwrap();

    let records = teacher.list_attendance(&AttendanceQuery::default()).await.unwrap();
    let found = shared_types::defaulters(&records, &AttendanceThresholds::default());

    let ids: Vec<i64> = found.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![RAVI_STUDENT_ID]);
    assert_eq!(found[0].1.percentage(), 50.0);
}
