use client::{MemoryStorage, Session, SessionStorage};
use pretty_assertions::assert_eq;
use shared_types::{guard, Access, AppPage, UserRole};
use std::rc::Rc;

use crate::common::{self, STUDENT};

#[tokio::test]
async fn test_signed_in_session_survives_reload() {
    let backend = common::spawn_backend().await;
    let (user, token) = backend
        .client()
        .sign_in(&shared_types::LoginRequest {
            username: STUDENT.0.into(),
            password: STUDENT.1.into(),
        })
        .await
        .unwrap();

    let storage = Rc::new(MemoryStorage::new());
    let mut session = Session::new(storage.clone());
    session.sign_in(user, token);

    let restored = Session::restore(storage.clone(), chrono::Utc::now());
    assert_eq!(restored, session);
    assert_eq!(restored.role(), Some(UserRole::Student));
    assert_eq!(
        guard(restored.role(), AppPage::AdminDashboard),
        Access::Redirect(AppPage::StudentDashboard)
    );

    let api = backend.client().with_token(restored.token().map(str::to_string));
    assert_eq!(api.current_user().await.unwrap().username, "asha");
}

#[tokio::test]
async fn test_session_restored_after_expiry_is_signed_out() {
    let backend = common::spawn_backend().await;
    let (user, token) = backend
        .client()
        .sign_in(&shared_types::LoginRequest {
            username: STUDENT.0.into(),
            password: STUDENT.1.into(),
        })
        .await
        .unwrap();

    let storage = Rc::new(MemoryStorage::new());
    Session::new(storage.clone()).sign_in(user, token);

    let two_hours_later = chrono::Utc::now() + chrono::Duration::hours(2);
    let restored = Session::restore(storage.clone(), two_hours_later);

    assert!(!restored.is_authenticated());
    assert_eq!(guard(restored.role(), AppPage::StudentDashboard), Access::RedirectToLogin);
    assert!(storage.get(client::session::TOKEN_KEY).is_none());
}
