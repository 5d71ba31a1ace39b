use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a signed-in user. Decides which pages and navigation links are available.
///
/// - `Admin`: manages the student directory and sees institution-wide numbers.
/// - `Teacher`: marks and reviews attendance.
/// - `Student`: views their own attendance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    #[default]
    Student,
}

/// All roles in display order.
pub const ALL_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Teacher, UserRole::Student];

impl UserRole {
    /// Parse from the JWT `role` claim or a form value. Unknown values default to Student.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => UserRole::Admin,
            "teacher" => UserRole::Teacher,
            _ => UserRole::Student,
        }
    }

    /// Lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Teacher => "Teacher",
            UserRole::Student => "Student",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record as returned by `/auth/register` and `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub is_active: i64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Signed-in user kept in the session (safe to persist client-side).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl AuthUser {
    /// First letter of the display name, uppercased, for the navbar avatar.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

impl From<UserProfile> for AuthUser {
    fn from(profile: UserProfile) -> Self {
        let name = profile
            .full_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| profile.username.clone());
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            name,
            role: profile.role,
        }
    }
}

/// OAuth2 password-flow token response from `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Decoded access-token payload. The frontend reads it without verifying the signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub id: Option<i64>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// True once `now` has reached the expiry. Tokens without `exp` never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.map(|exp| now.timestamp() >= exp).unwrap_or(false)
    }
}

/// Login form. Sent as `application/x-www-form-urlencoded` (OAuth2 password flow).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Register request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub password: String,
    pub role: UserRole,
}
