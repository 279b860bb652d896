// src/repositories/mod.rs
//
// Repository layer
//
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission

pub mod settings_repository;

pub use settings_repository::{default_settings_path, JsonSettingsRepository, SettingsRepository};

#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
