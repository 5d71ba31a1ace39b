use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, CreateStudentRequest, UpdateStudentRequest};

use crate::common::{self, ADMIN, ASHA_STUDENT_ID, RAVI_STUDENT_ID};

#[tokio::test]
async fn test_list_students_includes_user_details() {
    let backend = common::spawn_backend().await;
    let admin = backend.client_as(ADMIN).await;

    let students = admin.list_students(0, 100).await.unwrap();

    assert_eq!(students.len(), 2);
    let asha = &students[0];
    assert_eq!(asha.id, ASHA_STUDENT_ID);
    assert_eq!(asha.student_id, "CS2024001");
    assert_eq!(asha.display_name(), "Asha Nair");
    assert_eq!(asha.email, "asha@college.edu");
    assert!(asha.matches_filters(Some("Computer Science"), Some(3)));
}

#[tokio::test]
async fn test_list_students_respects_skip_and_limit() {
    let backend = common::spawn_backend().await;
    let admin = backend.client_as(ADMIN).await;

    let page = admin.list_students(1, 1).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, RAVI_STUDENT_ID);
}

#[tokio::test]
async fn test_list_students_without_token_is_unauthorized() {
    let backend = common::spawn_backend().await;

    let err = backend.client().list_students(0, 10).await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_create_get_update_delete_student() {
    let backend = common::spawn_backend().await;
    let admin = backend.client_as(ADMIN).await;

    let created = admin
        .create_student(&CreateStudentRequest {
            user_id: 1,
            student_id: "ME2024010".into(),
            department: Some("Mechanical".into()),
            year: Some(2),
            section: None,
            phone: None,
        })
        .await
        .unwrap();
    assert_eq!(created.student_id, "ME2024010");

    let fetched = admin.get_student(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = admin
        .update_student(
            created.id,
            &UpdateStudentRequest {
                section: Some("B".into()),
                ..UpdateStudentRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.section.as_deref(), Some("B"));
    assert_eq!(updated.department.as_deref(), Some("Mechanical"));

    admin.delete_student(created.id).await.unwrap();
    let err = admin.get_student(created.id).await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Student not found");
}

#[tokio::test]
async fn test_duplicate_roll_number_is_rejected() {
    let backend = common::spawn_backend().await;

    let err = backend
        .client()
        .create_student(&CreateStudentRequest {
            user_id: 4,
            student_id: "CS2024001".into(),
            department: None,
            year: None,
            section: None,
            phone: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert_eq!(err.message, "Student ID already registered");
}
