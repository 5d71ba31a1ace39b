use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Student record (`/students/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    /// Roll number, e.g. "CS2024001".
    pub student_id: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Student joined with its user account, as listed by `/students/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentWithUser {
    pub id: i64,
    pub user_id: i64,
    pub student_id: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub email: String,
    pub username: String,
}

impl StudentWithUser {
    /// Name shown in tables: full name, or the username when none is set.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Department + year filter used by the mark-attendance page.
    /// Empty/None filters accept everything.
    pub fn matches_filters(&self, department: Option<&str>, year: Option<i64>) -> bool {
        if let Some(dept) = department.filter(|d| !d.is_empty()) {
            if self.department.as_deref() != Some(dept) {
                return false;
            }
        }
        if let Some(year) = year {
            if self.year != Some(year) {
                return false;
            }
        }
        true
    }
}

/// Body for `POST /students/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateStudentRequest {
    pub user_id: i64,
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body for `PUT /students/{id}`. Only present fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateStudentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}
