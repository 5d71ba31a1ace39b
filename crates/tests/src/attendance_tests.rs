use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, AttendanceQuery, AttendanceStatus, MarkAttendanceRequest};

use crate::common::{self, ASHA_STUDENT_ID, RAVI_STUDENT_ID, TEACHER};

fn mark(student_id: i64, status: AttendanceStatus) -> MarkAttendanceRequest {
    MarkAttendanceRequest {
        student_id,
        subject: "Physics".into(),
        status,
        marked_by: 2,
        remarks: Some("Manual entry".into()),
    }
}

#[tokio::test]
async fn test_mark_and_list_attendance() {
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;

    let record = teacher
        .mark_attendance(&mark(ASHA_STUDENT_ID, AttendanceStatus::Late))
        .await
        .unwrap();
    assert_eq!(record.student_id, ASHA_STUDENT_ID);
    assert_eq!(record.status, AttendanceStatus::Late);
    assert_eq!(record.subject.as_deref(), Some("Physics"));
    assert_eq!(record.marked_by, 2);

    let listed = teacher.list_attendance(&AttendanceQuery::default()).await.unwrap();
    assert_eq!(listed, vec![record.clone()]);

    let fetched = teacher.get_attendance(record.id).await.unwrap();
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn test_list_attendance_filters_by_student_and_date() {
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;
    teacher
        .mark_attendance_batch(&[
            mark(ASHA_STUDENT_ID, AttendanceStatus::Present),
            mark(RAVI_STUDENT_ID, AttendanceStatus::Absent),
        ])
        .await
        .unwrap();

    let ravi = teacher
        .list_attendance(&AttendanceQuery::for_student(RAVI_STUDENT_ID))
        .await
        .unwrap();
    assert_eq!(ravi.len(), 1);
    assert_eq!(ravi[0].status, AttendanceStatus::Absent);

    let today = chrono::Utc::now().date_naive();
    let tomorrow = today.succ_opt().unwrap();
    let future = teacher
        .list_attendance(&AttendanceQuery {
            start_date: Some(tomorrow),
            ..AttendanceQuery::default()
        })
        .await
        .unwrap();
    assert!(future.is_empty());

    let limited = teacher
        .list_attendance(&AttendanceQuery::default().limit(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_batch_marks_every_student() {
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;

    let records = teacher
        .mark_attendance_batch(&[
            mark(ASHA_STUDENT_ID, AttendanceStatus::Present),
            mark(RAVI_STUDENT_ID, AttendanceStatus::Late),
        ])
        .await
        .unwrap();

    let mut students: Vec<i64> = records.iter().map(|r| r.student_id).collect();
    students.sort();
    assert_eq!(students, vec![ASHA_STUDENT_ID, RAVI_STUDENT_ID]);
}

#[tokio::test]
async fn test_batch_fails_when_any_request_fails() {
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;

    let err = teacher
        .mark_attendance_batch(&[
            mark(ASHA_STUDENT_ID, AttendanceStatus::Present),
            mark(999, AttendanceStatus::Present),
        ])
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Student not found");
}

#[tokio::test]
async fn test_delete_attendance() {
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;
    let record = teacher
        .mark_attendance(&mark(ASHA_STUDENT_ID, AttendanceStatus::Absent))
        .await
        .unwrap();

    teacher.delete_attendance(record.id).await.unwrap();

    let err = teacher.get_attendance(record.id).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    let err = teacher.delete_attendance(record.id).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
}

#[tokio::test]
async fn test_deleting_student_removes_their_records() {
    let backend = common::spawn_backend().await;
    let teacher = backend.client_as(TEACHER).await;
    teacher
        .mark_attendance(&mark(RAVI_STUDENT_ID, AttendanceStatus::Present))
        .await
        .unwrap();

    teacher.delete_student(RAVI_STUDENT_ID).await.unwrap();

    let remaining = teacher
        .list_attendance(&AttendanceQuery::for_student(RAVI_STUDENT_ID))
        .await
        .unwrap();
    assert!(remaining.is_empty());
}
