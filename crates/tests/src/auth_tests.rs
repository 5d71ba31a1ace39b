use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, LoginRequest, RegisterRequest, UserRole};

use crate::common::{self, ADMIN, STUDENT, TEACHER};

fn credentials((username, password): (&str, &str)) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let backend = common::spawn_backend().await;

    let token = backend.client().login(&credentials(TEACHER)).await.unwrap();

    assert_eq!(token.token_type, "bearer");
    let claims = client::decode_claims(&token.access_token).unwrap();
    assert_eq!(claims.sub, "teacher");
    assert_eq!(claims.role, UserRole::Teacher);
    assert_eq!(claims.id, Some(2));
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let backend = common::spawn_backend().await;

    let err = backend
        .client()
        .login(&credentials(("teacher", "nope")))
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Incorrect username or password");
}

#[tokio::test]
async fn test_sign_in_loads_profile() {
    let backend = common::spawn_backend().await;

    let (user, token) = backend.client().sign_in(&credentials(STUDENT)).await.unwrap();

    assert!(!token.is_empty());
    assert_eq!(user.username, "asha");
    assert_eq!(user.name, "Asha Nair");
    assert_eq!(user.role, UserRole::Student);
    assert_eq!(user.role.home_page().path(), "/student/dashboard");
}

#[tokio::test]
async fn test_current_user_requires_token() {
    let backend = common::spawn_backend().await;

    let err = backend.client().current_user().await.unwrap_err();
    assert!(err.is_unauthorized());

    let admin = backend.client_as(ADMIN).await;
    let profile = admin.current_user().await.unwrap();
    assert_eq!(profile.role, UserRole::Admin);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let backend = common::spawn_backend().await;
    let stale = common::issue_token("admin", "admin", 1, chrono::Utc::now().timestamp() - 60);

    let err = backend
        .client()
        .with_token(Some(stale))
        .current_user()
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_register_then_sign_in() {
    let backend = common::spawn_backend().await;
    let api = backend.client();

    let profile = api
        .register(&RegisterRequest {
            email: "neha@college.edu".into(),
            username: "neha".into(),
            full_name: Some("Neha Das".into()),
            password: "Neha@2026".into(),
            role: UserRole::Teacher,
        })
        .await
        .unwrap();
    assert_eq!(profile.username, "neha");
    assert_eq!(profile.role, UserRole::Teacher);

    let (user, _) = api.sign_in(&credentials(("neha", "Neha@2026"))).await.unwrap();
    assert_eq!(user.id, profile.id);
    assert_eq!(user.name, "Neha Das");
}

#[tokio::test]
async fn test_register_duplicate_username_is_bad_request() {
    let backend = common::spawn_backend().await;

    let err = backend
        .client()
        .register(&RegisterRequest {
            email: "other@college.edu".into(),
            username: "asha".into(),
            full_name: None,
            password: "Asha@1234".into(),
            role: UserRole::Student,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::BadRequest);
    assert_eq!(err.friendly_message(), "Username already registered");
}
