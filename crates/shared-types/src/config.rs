use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Top-level config file structure matching `config.toml`.
///
/// Every section and field has a default so that a missing or partial file
/// still yields a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub attendance: AttendanceThresholds,
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Replace the API base URL when an override is present and non-blank.
    pub fn with_api_override(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = url.to_string();
        }
        self
    }
}

/// Location of the attendance REST API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Defaults for every TabularView in the app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
        }
    }
}

fn default_items_per_page() -> usize {
    10
}

/// Attendance percentage thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AttendanceThresholds {
    /// Below this a student is a defaulter.
    #[serde(default = "default_minimum")]
    pub minimum: f64,
    #[serde(default = "default_warning")]
    pub warning: f64,
    #[serde(default = "default_good")]
    pub good: f64,
}

impl Default for AttendanceThresholds {
    fn default() -> Self {
        Self {
            minimum: default_minimum(),
            warning: default_warning(),
            good: default_good(),
        }
    }
}

fn default_minimum() -> f64 {
    75.0
}

fn default_warning() -> f64 {
    80.0
}

fn default_good() -> f64 {
    90.0
}
