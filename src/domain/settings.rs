// src/domain/settings.rs
use serde::{Deserialize, Serialize};

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Raw trimmed secret input, empty when not remembered
    pub secret: String,

    pub remember_secret: bool,
}

impl Settings {
    pub fn new(secret: impl Into<String>, remember_secret: bool) -> Self {
        Self {
            secret: secret.into(),
            remember_secret,
        }
    }

    /// Snapshot to persist for the given in-memory input.
    /// A forgotten secret is always written as an empty string.
    pub fn from_input(secret_input: &str, remember_secret: bool) -> Self {
        let secret = if remember_secret {
            secret_input.trim().to_string()
        } else {
            String::new()
        };
        Self::new(secret, remember_secret)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            remember_secret: true,
        }
    }
}
