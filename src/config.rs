//! Application Configuration
//!
//! Defaults, overridden by the `BOARD_API_BASE_URL` build-time env var,
//! overridden by an optional `window.__BOARD_CONFIG__` object.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

const DEFAULT_API_BASE_URL: &str = "/api";
const WINDOW_CONFIG_KEY: &str = "__BOARD_CONFIG__";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Local storage key holding the bearer token
    pub token_storage_key: String,
    pub log_level: log::LevelFilter,
    pub toast_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("BOARD_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            token_storage_key: "board.token".to_string(),
            log_level: log::LevelFilter::Info,
            toast_timeout_ms: 4000,
        }
    }
}

/// Partial config as injected by the hosting page
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub token_storage_key: Option<String>,
    pub log_level: Option<String>,
    pub toast_timeout_ms: Option<u32>,
}

impl AppConfig {
    pub fn apply(mut self, overrides: ConfigOverrides) -> AppResult<Self> {
        if let Some(url) = overrides.api_base_url {
            self.api_base_url = url;
        }
        if let Some(key) = overrides.token_storage_key {
            self.token_storage_key = key;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level
                .parse()
                .map_err(|_| AppError::Config(format!("unknown log level '{}'", level)))?;
        }
        if let Some(ms) = overrides.toast_timeout_ms {
            self.toast_timeout_ms = ms;
        }
        self.normalize()
    }

    fn normalize(mut self) -> AppResult<Self> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(AppError::Config("apiBaseUrl must not be empty".to_string()));
        }
        self.api_base_url = trimmed.to_string();
        if self.token_storage_key.trim().is_empty() {
            return Err(AppError::Config("tokenStorageKey must not be empty".to_string()));
        }
        Ok(self)
    }

    /// Build the config for this page
    pub fn load() -> AppResult<Self> {
        let overrides = read_window_overrides()?;
        Ok(AppConfig::default().apply(overrides)?.resolved())
    }

    /// Make the base URL absolute using the page origin
    pub fn resolved(mut self) -> Self {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            self.api_base_url = resolve_base_url(&self.api_base_url, &origin);
        }
        self
    }
}

/// HTTP requests need an absolute URL; a path-only base is taken relative
/// to the page origin
pub fn resolve_base_url(base_url: &str, origin: &str) -> String {
    if base_url.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), base_url)
    } else {
        base_url.to_string()
    }
}

fn read_window_overrides() -> AppResult<ConfigOverrides> {
    let Some(window) = web_sys::window() else {
        return Ok(ConfigOverrides::default());
    };
    let value = js_sys::Reflect::get(&window, &WINDOW_CONFIG_KEY.into())
        .map_err(|_| AppError::Config(format!("cannot read window.{}", WINDOW_CONFIG_KEY)))?;
    if value.is_undefined() || value.is_null() {
        return Ok(ConfigOverrides::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| AppError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AppConfig {
        AppConfig {
            api_base_url: "/api".into(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_overrides_apply() {
        let config = base()
            .apply(ConfigOverrides {
                api_base_url: Some("https://api.example.com/v1/".into()),
                log_level: Some("debug".into()),
                toast_timeout_ms: Some(1500),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.log_level, log::LevelFilter::Debug);
        assert_eq!(config.toast_timeout_ms, 1500);
        assert_eq!(config.token_storage_key, "board.token");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = base()
            .apply(ConfigOverrides { api_base_url: Some(" / ".into()), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let err = base()
            .apply(ConfigOverrides { log_level: Some("loud".into()), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_relative_base_resolved_against_origin() {
        assert_eq!(resolve_base_url("/api", "https://app.example.com/"), "https://app.example.com/api");
        assert_eq!(resolve_base_url("https://api.example.com", "https://app.example.com"), "https://api.example.com");
    }

    #[test]
    fn test_overrides_deserialize_camel_case() {
        let o: ConfigOverrides = serde_json::from_str(r#"{"apiBaseUrl":"http://x","toastTimeoutMs":10}"#).unwrap();
        assert_eq!(o.api_base_url.as_deref(), Some("http://x"));
        assert_eq!(o.toast_timeout_ms, Some(10));
    }
}
