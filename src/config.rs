//! Application Configuration
//!
//! Build-time settings, read from environment variables when the bundle is
//! compiled:
//!
//! - `KANBAN_API_BASE_URL`: REST server origin (default: `http://localhost:8080`)
//! - `KANBAN_LOG_LEVEL`: console log level (default: `info`)

use log::LevelFilter;

/// Storage key of the create-task draft
pub const DRAFT_STORAGE_KEY: &str = "kanban.task_draft";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_ERROR_BANNER_MS: u32 = 6_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Origin of the REST API, without trailing slash
    pub api_base_url: String,
    /// Applied on native targets only; the browser fetch has no timeout hook
    pub request_timeout_ms: u64,
    pub draft_storage_key: String,
    /// How long the page-level error banner stays visible
    pub error_banner_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            draft_storage_key: DRAFT_STORAGE_KEY.to_string(),
            error_banner_ms: DEFAULT_ERROR_BANNER_MS,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Load configuration baked in at compile time
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("KANBAN_API_BASE_URL"), option_env!("KANBAN_LOG_LEVEL"))
    }

    fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(level) = log_level.and_then(|l| l.parse().ok()) {
            config.log_level = level;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_values(None, None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = AppConfig::from_values(Some("https://api.example.com/"), None);
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn invalid_log_level_keeps_default() {
        let config = AppConfig::from_values(None, Some("chatty"));
        assert_eq!(config.log_level, LevelFilter::Info);

        let config = AppConfig::from_values(None, Some("debug"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
