use shared_types::AppConfig;

/// `config.toml` from the workspace root, embedded at build time.
const CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Build the runtime configuration.
///
/// `ATTENDANCE_API_URL`, when set at build time, replaces `api.base_url`.
pub fn load_config() -> AppConfig {
    let config = parse_config(CONFIG_TOML, option_env!("ATTENDANCE_API_URL"));
    tracing::info!(
        api = %config.api.base_url,
        items_per_page = config.table.items_per_page,
        "Configuration loaded"
    );
    config
}

/// Parse `contents`, falling back to defaults when the file is invalid.
pub fn parse_config(contents: &str, api_override: Option<&str>) -> AppConfig {
    let config = match AppConfig::from_toml_str(contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid config.toml, using defaults");
            AppConfig::default()
        }
    };
    config.with_api_override(api_override)
}
