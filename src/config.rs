//! Application Configuration
//!
//! Settings are baked in at build time: an optional JSON document in
//! `TODO_UI_CONFIG`, then single-value overrides `TODO_API_BASE` and
//! `TODO_LOG`. An empty API base resolves to the page origin.

use serde::Deserialize;
use tracing::Level;

use crate::error::{AppError, AppResult};

const CONFIG_JSON: Option<&str> = option_env!("TODO_UI_CONFIG");
const API_BASE_OVERRIDE: Option<&str> = option_env!("TODO_API_BASE");
const LOG_OVERRIDE: Option<&str> = option_env!("TODO_LOG");

/// Used when the page origin cannot be read
const FALLBACK_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Scheme + host of the REST API; empty means same origin
    pub api_base: String,
    /// trace | debug | info | warn | error
    pub log_level: String,
    /// Lines kept by the rolling logger
    pub log_capacity: usize,
    /// Render the recent-log panel under the app
    pub show_log_panel: bool,
    /// Delay before switching from signup success to the login screen
    pub signup_redirect_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: "info".to_string(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
            show_log_panel: false,
            signup_redirect_ms: 1500,
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build-time configuration for the running page.
    ///
    /// Never fails: a broken config document falls back to defaults and the
    /// error is handed back so it can be logged once logging is up.
    pub fn load() -> (Self, Option<AppError>) {
        let (config, error) = match CONFIG_JSON {
            Some(json) => match Self::from_json(json) {
                Ok(config) => (config, None),
                Err(err) => (Self::default(), Some(err)),
            },
            None => (Self::default(), None),
        };

        let mut config = config.with_overrides(API_BASE_OVERRIDE, LOG_OVERRIDE);
        if config.api_base.is_empty() {
            config.api_base = browser_origin().unwrap_or_else(|| FALLBACK_ORIGIN.to_string());
        }
        (config, error)
    }

    /// Apply single-value overrides; an invalid log level is ignored
    pub fn with_overrides(mut self, api_base: Option<&str>, log_level: Option<&str>) -> Self {
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            self.api_base = base.to_string();
        }
        if let Some(level) = log_level.filter(|l| parse_level(l).is_ok()) {
            self.log_level = level.trim().to_string();
        }
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn level(&self) -> Level {
        parse_level(&self.log_level).unwrap_or(Level::INFO)
    }

    fn validate(&self) -> AppResult<()> {
        parse_level(&self.log_level)?;
        Ok(())
    }
}

fn parse_level(value: &str) -> AppResult<Level> {
    value
        .trim()
        .parse::<Level>()
        .map_err(|_| AppError::Config(format!("unknown log level `{}`", value)))
}

fn browser_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.level(), Level::INFO);
    }

    #[test]
    fn test_partial_document() {
        let config =
            AppConfig::from_json(r#"{ "log_level": "debug", "show_log_panel": true }"#).unwrap();
        assert_eq!(config.level(), Level::DEBUG);
        assert!(config.show_log_panel);
        assert_eq!(config.signup_redirect_ms, 1500);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = AppConfig::from_json(r#"{ "log_level": "chatty" }"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(AppConfig::from_json(r#"{ "api_url": "x" }"#).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some("http://api.local:9000/"), Some("warn"));
        assert_eq!(config.api_base, "http://api.local:9000");
        assert_eq!(config.level(), Level::WARN);

        let unchanged = AppConfig::default().with_overrides(Some("  "), Some("loud"));
        assert_eq!(unchanged, AppConfig::default());
    }
}
