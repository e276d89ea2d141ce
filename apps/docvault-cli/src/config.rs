//! Client configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use docvault_infra::HttpConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid DOCVAULT_SESSION_BACKEND `{0}` (expected file, memory or none)")]
    InvalidBackend(String),
}

/// Where the session (tokens and cached profile) is kept between commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionBackend {
    /// JSON file on disk.
    #[default]
    File,
    /// Process memory only; every command starts signed out.
    Memory,
    /// No storage at all.
    None,
}

impl FromStr for SessionBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "none" => Ok(Self::None),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// Overrides the platform default location of the session file.
    pub file: Option<PathBuf>,
}

impl SessionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match var("DOCVAULT_SESSION_BACKEND") {
            Some(raw) => raw.parse()?,
            None => SessionBackend::default(),
        };

        Ok(Self {
            backend,
            file: var("DOCVAULT_SESSION_FILE")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub http: HttpConfig,
    pub session: SessionConfig,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            http: HttpConfig::from_env(),
            session: SessionConfig::from_env()?,
        })
    }

    /// Apply command-line flags on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, session_file: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.http.base_url = url;
        }
        if let Some(path) = session_file {
            self.session.file = Some(path);
        }
        self
    }
}
