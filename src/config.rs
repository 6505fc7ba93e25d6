//! Configuration management for Dhraviq
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::agents::catalog;
use crate::agents::selection::MAX_SELECTED_AGENTS;
use crate::error::{DhraviqError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Dhraviq
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote agent service settings
    #[serde(default)]
    pub service: ServiceConfig,
    /// Chat behavior settings
    #[serde(default)]
    pub chat: ChatConfig,
    /// Local progress store settings
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Logging output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote agent service configuration
///
/// Points the client at the gateway that exposes the health check and
/// the run-agents endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the gateway, e.g. `https://api.dhraviq.com`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the unauthenticated health endpoint
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Path of the run-agents endpoint
    #[serde(default = "default_run_agents_path")]
    pub run_agents_path: String,

    /// Ceiling for one turn (seconds); a turn exceeding it is failed
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_run_agents_path() -> String {
    "/run_agents".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_path: default_health_path(),
            run_agents_path: default_run_agents_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of agents per conversation (1 or 2)
    #[serde(default = "default_max_agents")]
    pub max_agents: usize,

    /// Ask the gateway to send email reminders for each question
    #[serde(default)]
    pub reminders_enabled: bool,

    /// Persona ids selected when a conversation starts
    #[serde(default)]
    pub default_agents: Vec<String>,
}

fn default_max_agents() -> usize {
    MAX_SELECTED_AGENTS
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_agents: default_max_agents(),
            reminders_enabled: false,
            default_agents: Vec::new(),
        }
    }
}

/// Progress store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Explicit database path; the platform data directory is used when unset
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DhraviqError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| DhraviqError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("DHRAVIQ_BASE_URL") {
            self.service.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("DHRAVIQ_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.service.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid DHRAVIQ_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(reminders) = std::env::var("DHRAVIQ_REMINDERS") {
            match reminders.to_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => self.chat.reminders_enabled = true,
                "0" | "false" | "off" | "no" => self.chat.reminders_enabled = false,
                _ => tracing::warn!("Invalid DHRAVIQ_REMINDERS: {}", reminders),
            }
        }

        if let Ok(db_path) = std::env::var("DHRAVIQ_PROGRESS_DB") {
            self.progress.db_path = Some(PathBuf::from(db_path));
        }

        if let Ok(agents) = std::env::var("DHRAVIQ_DEFAULT_AGENTS") {
            let ids: Vec<String> = agents
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            tracing::debug!(?ids, "Env override: DHRAVIQ_DEFAULT_AGENTS");
            self.chat.default_agents = ids;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.base_url {
            self.service.base_url = base_url.clone();
        }
        if cli.json_logs {
            self.logging.json = true;
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.service.base_url).map_err(|e| {
            DhraviqError::Config(format!(
                "service.base_url is not a valid URL ({}): {}",
                self.service.base_url, e
            ))
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(DhraviqError::Config(format!(
                "service.base_url must use http or https, got {}",
                base.scheme()
            ))
            .into());
        }

        for (name, path) in [
            ("service.health_path", &self.service.health_path),
            ("service.run_agents_path", &self.service.run_agents_path),
        ] {
            if !path.starts_with('/') {
                return Err(
                    DhraviqError::Config(format!("{} must start with '/'", name)).into(),
                );
            }
        }

        if self.service.timeout_seconds == 0 {
            return Err(DhraviqError::Config(
                "service.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.max_agents == 0 || self.chat.max_agents > MAX_SELECTED_AGENTS {
            return Err(DhraviqError::Config(format!(
                "chat.max_agents must be between 1 and {}",
                MAX_SELECTED_AGENTS
            ))
            .into());
        }

        if self.chat.default_agents.len() > self.chat.max_agents {
            return Err(DhraviqError::Config(format!(
                "chat.default_agents lists {} agents but chat.max_agents is {}",
                self.chat.default_agents.len(),
                self.chat.max_agents
            ))
            .into());
        }

        if let Some(unknown) = self
            .chat
            .default_agents
            .iter()
            .find(|id| catalog::find(id).is_none())
        {
            return Err(
                DhraviqError::Config(format!("Unknown agent in chat.default_agents: {}", unknown))
                    .into(),
            );
        }

        Ok(())
    }
}
