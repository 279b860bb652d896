// src/repositories/settings_repository.rs
//
// Settings persistence
//
// - load() never fails: absent or unreadable files yield defaults
// - save() creates the parent directory and replaces the file via rename

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::Settings;
use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "catnote";
const SETTINGS_FILE_NAME: &str = "settings.json";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Settings;
    async fn save(&self, settings: &Settings) -> AppResult<()>;
}

/// Default settings file location.
///
/// Path structure: {APP_DATA}/catnote/settings.json
pub fn default_settings_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SETTINGS_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self) -> Settings {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(e) => {
                log::warn!("Failed to read settings from {}: {}", self.path.display(), e);
                return Settings::default();
            }
        };

        match serde_json::from_str::<Option<Settings>>(&json) {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                log::warn!("Settings file {} is unreadable: {}", self.path.display(), e);
                Settings::default()
            }
        }
    }

    async fn save(&self, settings: &Settings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(settings)?;
        let temp_path = self.temp_path();

        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        log::debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}
