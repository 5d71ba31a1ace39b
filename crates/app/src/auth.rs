use client::{ApiClient, MemoryStorage, Session, SessionStorage};
use dioxus::prelude::*;
use shared_types::{AppConfig, AppError, AuthUser, UserRole};
use std::rc::Rc;

/// Global authentication state: the session, mirrored into local storage.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub session: Signal<Session>,
}

impl AuthState {
    /// Restore the previous session, if it is still valid.
    pub fn restore() -> Self {
        let session = Session::restore(session_storage(), chrono::Utc::now());
        if let Some(user) = session.user() {
            tracing::info!(user_id = user.id, role = %user.role, "Session restored");
        }
        Self {
            session: Signal::new(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.session.read().user().cloned()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.session.read().role()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().token().map(str::to_string)
    }

    pub fn sign_in(&mut self, user: AuthUser, token: String) {
        self.session.write().sign_in(user, token);
    }

    pub fn sign_out(&mut self) {
        tracing::info!("Signed out");
        self.session.write().sign_out();
    }

    /// Text to show for a failed call. A rejected token ends the session,
    /// which sends the guard back to the login page.
    pub fn report(&mut self, error: &AppError) -> String {
        if error.is_unauthorized() && self.is_authenticated() {
            tracing::warn!("Session rejected by the API");
            self.sign_out();
        }
        error.friendly_message()
    }
}

#[cfg(feature = "web")]
fn session_storage() -> Rc<dyn SessionStorage> {
    match client::BrowserStorage::local() {
        Some(storage) => Rc::new(storage),
        None => {
            tracing::warn!("localStorage unavailable, session will not persist");
            Rc::new(MemoryStorage::new())
        }
    }
}

#[cfg(not(feature = "web"))]
fn session_storage() -> Rc<dyn SessionStorage> {
    Rc::new(MemoryStorage::new())
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// API client for the configured backend, carrying the current token.
pub fn use_api() -> ApiClient {
    let config = use_context::<AppConfig>();
    let auth = use_auth();
    ApiClient::new(config.api.base_url).with_token(auth.token())
}
