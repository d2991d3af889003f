//! Configuration and credential loading
//!
//! The API token comes from `CHATWORK_API_TOKEN` (a `.env` file is loaded by
//! `main` beforehand) and falls back to `api_token` in the settings file.
//! The resulting [`Config`] is read once at start-up and never mutated.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "CHATWORK_API_TOKEN";

/// Chatwork API token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Blank values count as "not configured".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// On-disk settings (`config.toml`)
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    api_token: Option<String>,
}

/// Application configuration
#[derive(Debug, Default, Clone)]
pub struct Config {
    api_token: Option<ApiToken>,
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "chatwork-mcp", "chatwork-mcp")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the settings file (if any) and overlay the environment.
    pub fn load() -> Result<Self> {
        let file = Self::load_file()?;
        let env = std::env::var(TOKEN_ENV).ok();
        Ok(Self::from_sources(env, file.api_token))
    }

    fn load_file() -> Result<SettingsFile> {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!("No config directory: {:#}", e);
                return Ok(SettingsFile::default());
            }
        };

        if !path.exists() {
            return Ok(SettingsFile::default());
        }

        tracing::debug!("Reading settings from {}", path.display());
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Environment wins; the settings file is only a fallback.
    pub fn from_sources(env_token: Option<String>, file_token: Option<String>) -> Self {
        let api_token = env_token
            .and_then(ApiToken::new)
            .or_else(|| file_token.and_then(ApiToken::new));
        Self { api_token }
    }

    pub fn api_token(&self) -> Option<&ApiToken> {
        self.api_token.as_ref()
    }

    pub fn into_api_token(self) -> Option<ApiToken> {
        self.api_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_file() {
        let config = Config::from_sources(Some("env-token".into()), Some("file-token".into()));
        assert_eq!(config.api_token().map(ApiToken::expose), Some("env-token"));
    }

    #[test]
    fn test_blank_env_falls_back_to_file() {
        let config = Config::from_sources(Some("   ".into()), Some("file-token".into()));
        assert_eq!(config.api_token().map(ApiToken::expose), Some("file-token"));
    }

    #[test]
    fn test_missing_token() {
        let config = Config::from_sources(None, None);
        assert!(config.api_token().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = ApiToken::new("secret-value").unwrap();
        assert_eq!(format!("{:?}", token), "ApiToken(***)");
    }

    #[test]
    fn test_settings_file_parse() {
        let file: SettingsFile = toml::from_str("api_token = \"abc\"\n").unwrap();
        assert_eq!(file.api_token.as_deref(), Some("abc"));
    }
}
