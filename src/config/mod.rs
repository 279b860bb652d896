// src/config/mod.rs
//
// Runtime configuration
//
// Defaults mirror the hosted service. Environment variables override them:
// - CATNOTE_API_HOST       host behind `api.` (default catnote.cn)
// - CATNOTE_TIMEOUT_SECS   request timeout in seconds (default 15)
// - CATNOTE_SETTINGS_PATH  settings file location
// Blank values are ignored.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{DEFAULT_API_HOST, MAX_CONTENT_LENGTH};
use crate::error::{AppError, AppResult};
use crate::integrations::DEFAULT_TIMEOUT;
use crate::repositories::default_settings_path;

pub const ENV_API_HOST: &str = "CATNOTE_API_HOST";
pub const ENV_TIMEOUT_SECS: &str = "CATNOTE_TIMEOUT_SECS";
pub const ENV_SETTINGS_PATH: &str = "CATNOTE_SETTINGS_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_host: String,
    pub request_timeout: Duration,
    /// `None` means the platform default (see `default_settings_path`)
    pub settings_path: Option<PathBuf>,
    pub max_content_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            settings_path: None,
            max_content_length: MAX_CONTENT_LENGTH,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = non_blank(ENV_API_HOST) {
            config.api_host = host;
        }

        if let Some(raw) = non_blank(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                AppError::Config(format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
            if secs == 0 {
                return Err(AppError::Config(format!("{} must be greater than zero", ENV_TIMEOUT_SECS)));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = non_blank(ENV_SETTINGS_PATH) {
            config.settings_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Configured settings path, or the platform default.
    pub fn resolve_settings_path(&self) -> AppResult<PathBuf> {
        match &self.settings_path {
            Some(path) => Ok(path.clone()),
            None => default_settings_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_host, "catnote.cn");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.max_content_length, 5000);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_HOST, " notes.test "),
            (ENV_TIMEOUT_SECS, "30"),
            (ENV_SETTINGS_PATH, "/tmp/catnote.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_host, "notes.test");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.resolve_settings_path().unwrap(), PathBuf::from("/tmp/catnote.json"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_API_HOST, "  "), (ENV_TIMEOUT_SECS, "")])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = AppConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
