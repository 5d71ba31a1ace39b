use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, RegisterRequest, UserRole};

use crate::common;

#[tokio::test]
async fn test_validation_errors_map_to_fields() {
    let backend = common::spawn_backend().await;

    let err = backend
        .client()
        .register(&RegisterRequest {
            email: "not-an-email".into(),
            username: "kiran".into(),
            full_name: None,
            password: "Kiran@2026".into(),
            role: UserRole::Student,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(
        err.field_errors.get("email").map(String::as_str),
        Some("value is not a valid email address")
    );
}

#[tokio::test]
async fn test_unknown_route_is_reported_without_detail() {
    let backend = common::spawn_backend().await;
    let body = reqwest::get(format!("{}/nowhere", backend.base_url))
        .await
        .unwrap();
    assert_eq!(body.status().as_u16(), 404);

    let err = shared_types::AppError::from_api_response(404, "");
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Request failed with status 404");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let backend = common::spawn_backend().await;

    let err = backend
        .client()
        .with_token(Some("not-a-jwt".into()))
        .current_user()
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.friendly_message(), "Could not validate credentials");
}

#[tokio::test]
async fn test_closed_port_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client::ApiClient::new(format!("http://{addr}"))
        .current_user()
        .await
        .unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Network);
    assert_eq!(
        err.friendly_message(),
        "Unable to reach the server. Please try again."
    );
}
