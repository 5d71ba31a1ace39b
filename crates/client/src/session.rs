use chrono::{DateTime, Utc};
use shared_types::{AuthUser, UserRole};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::token::decode_claims;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

/// Key/value persistence for the session (browser localStorage, or memory in tests).
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage`.
#[cfg(feature = "browser")]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(feature = "browser")]
impl BrowserStorage {
    /// `None` when there is no window or storage is disabled.
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(feature = "browser")]
impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.storage.set_item(key, value).is_err() {
            tracing::warn!(key, "Could not write to localStorage");
        }
    }

    fn remove(&self, key: &str) {
        if self.storage.remove_item(key).is_err() {
            tracing::warn!(key, "Could not remove from localStorage");
        }
    }
}

/// The signed-in user and their access token, mirrored into storage.
#[derive(Clone)]
pub struct Session {
    storage: Rc<dyn SessionStorage>,
    user: Option<AuthUser>,
    token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user && self.token == other.token
    }
}

impl Session {
    /// A signed-out session over `storage`.
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            user: None,
            token: None,
        }
    }

    /// Load a previous session from storage.
    ///
    /// Anything unusable (missing half, corrupt user JSON, unreadable or expired
    /// token) is wiped and a signed-out session is returned.
    pub fn restore(storage: Rc<dyn SessionStorage>, now: DateTime<Utc>) -> Self {
        let mut session = Self::new(storage);
        let (Some(user_json), Some(token)) = (
            session.storage.get(USER_KEY),
            session.storage.get(TOKEN_KEY),
        ) else {
            session.clear_storage();
            return session;
        };

        let user: AuthUser = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Stored user is unreadable, signing out");
                session.clear_storage();
                return session;
            }
        };

        match decode_claims(&token) {
            Ok(claims) if claims.is_expired_at(now) => {
                tracing::info!(user_id = user.id, "Stored token has expired, signing out");
                session.clear_storage();
            }
            Ok(_) => {
                session.user = Some(user);
                session.token = Some(token);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored token is unreadable, signing out");
                session.clear_storage();
            }
        }
        session
    }

    pub fn sign_in(&mut self, user: AuthUser, token: String) {
        match serde_json::to_string(&user) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(e) => tracing::error!(error = %e, "Could not persist user"),
        }
        self.storage.set(TOKEN_KEY, &token);
        self.user = Some(user);
        self.token = Some(token);
    }

    pub fn sign_out(&mut self) {
        self.clear_storage();
        self.user = None;
        self.token = None;
    }

    fn clear_storage(&self) {
        self.storage.remove(USER_KEY);
        self.storage.remove(TOKEN_KEY);
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}
