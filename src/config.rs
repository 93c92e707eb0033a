// src/config.rs
use std::env;
use thiserror::Error;

use crate::application::commands::documents::DEFAULT_SAVE_MAX_RETRIES;
use crate::domain::slug::services::DEFAULT_MAX_ATTEMPTS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlugSettings {
    database_url: String,
    database_max_connections: u32,
    max_attempts: u32,
    save_max_retries: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite::memory:".into()
}

impl Default for SlugSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            database_max_connections: 1,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            save_max_retries: DEFAULT_SAVE_MAX_RETRIES,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

impl SlugSettings {
    /// Build settings from environment variables, loading a `.env` file when
    /// present. Unset keys fall back to defaults; malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        let database_max_connections =
            parse_var("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?;
        let max_attempts = parse_var("SLUG_MAX_ATTEMPTS", defaults.max_attempts)?;
        let save_max_retries = parse_var("SLUG_SAVE_MAX_RETRIES", defaults.save_max_retries)?;

        if max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "SLUG_MAX_ATTEMPTS must be at least 1".into(),
            ));
        }
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        Ok(Self {
            database_url,
            database_max_connections,
            max_attempts,
            save_max_retries,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    /// Cap on existence checks per slug resolution.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// How often a save is retried after a concurrent slug collision.
    pub fn save_max_retries(&self) -> u32 {
        self.save_max_retries
    }
}
