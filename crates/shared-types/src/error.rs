use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    Unauthorized,
    Forbidden,
    Network,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

impl AppErrorKind {
    /// Map an HTTP status code returned by the attendance API to an error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            409 => AppErrorKind::Conflict,
            422 => AppErrorKind::ValidationError,
            500..=599 => AppErrorKind::InternalError,
            _ => AppErrorKind::BadRequest,
        }
    }
}

/// Structured application error shared by the REST client and the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

/// FastAPI error body: `detail` is either a message or a list of validation issues.
#[derive(Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

#[derive(Deserialize)]
struct ValidationIssue {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl AppError {
    fn with_kind(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::BadRequest, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Forbidden, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::Network, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::InternalError, message)
    }

    /// Build an error from a non-success API response.
    ///
    /// Understands both FastAPI shapes: `{"detail": "message"}` and the 422
    /// `{"detail": [{"loc": [..., "field"], "msg": "..."}]}` list, whose entries
    /// become `field_errors` keyed by the last `loc` segment.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let kind = AppErrorKind::from_status(status);
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: ErrorDetail::Message(message),
            }) => Self::with_kind(kind, message),
            Ok(ErrorBody {
                detail: ErrorDetail::Issues(issues),
            }) => {
                let mut field_errors = HashMap::new();
                for issue in issues {
                    let field = issue
                        .loc
                        .last()
                        .and_then(|seg| seg.as_str())
                        .unwrap_or("body")
                        .to_string();
                    field_errors.entry(field).or_insert(issue.msg);
                }
                Self {
                    kind,
                    message: "Validation failed".to_string(),
                    field_errors,
                }
            }
            Err(_) => Self::with_kind(kind, format!("Request failed with status {status}")),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == AppErrorKind::Unauthorized
    }

    /// Message suitable for showing to the user.
    ///
    /// Transport and server failures get a generic sentence; everything else
    /// passes the API's own message through.
    pub fn friendly_message(&self) -> String {
        match self.kind {
            AppErrorKind::Network => "Unable to reach the server. Please try again.".to_string(),
            AppErrorKind::InternalError => "Something went wrong. Please try again.".to_string(),
            _ => self.message.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}
