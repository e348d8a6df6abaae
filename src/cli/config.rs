//! Configuration management for CourseBuddy
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.coursebuddy/config.toml

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{AssistantError, Result};
use crate::rag::{
    ComposerConfig, PipelineConfig, SearchParams, MAX_LINK_TEXT_CHARS, MAX_MATCHES, MAX_SOURCES,
};

/// Complete configuration for CourseBuddy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub knowledge: KnowledgeConfig,
    pub retrieval: RetrievalConfig,
    pub answer: AnswerConfig,
    pub request: RequestConfig,
    pub telemetry: TelemetryConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Knowledge snapshot location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub snapshot_path: String,
}

/// Ranking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub max_matches: usize,
}

/// Answer composition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    pub max_sources: usize,
    pub link_text_chars: usize,
}

/// Per-request limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "knowledge_base.json".to_string(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { max_matches: 5 }
    }
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            max_sources: 3,
            link_text_chars: 100,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AssistantError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| AssistantError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// ~/.coursebuddy/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".coursebuddy").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        check_range("max_matches", self.retrieval.max_matches, MAX_MATCHES)?;
        check_range("max_sources", self.answer.max_sources, MAX_SOURCES)?;
        check_range("link_text_chars", self.answer.link_text_chars, MAX_LINK_TEXT_CHARS)?;

        if self.request.timeout_secs == 0 {
            return Err(AssistantError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.knowledge.snapshot_path.trim().is_empty() {
            return Err(AssistantError::ConfigError(
                "snapshot_path must not be empty".to_string(),
            ));
        }

        match self.telemetry.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(AssistantError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    self.telemetry.default_verbosity
                )))
            }
        }

        self.bind_addr()?;

        Ok(())
    }

    /// Serialize as pretty TOML, for `coursebuddy config`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AssistantError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Socket address the server binds to. `host` is an IPv4 or IPv6
    /// literal, or `localhost`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let host = self.server.host.trim();
        let ip = if host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            host.trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .map_err(|e| {
                    AssistantError::ConfigError(format!("Invalid server host {:?}: {}", host, e))
                })?
        };
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Knowledge snapshot path, tilde expanded
    pub fn snapshot_path(&self) -> PathBuf {
        Self::expand_path(&self.knowledge.snapshot_path)
    }

    /// Settings for the answer pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            search: SearchParams {
                top_k: self.retrieval.max_matches,
            },
            composer: ComposerConfig {
                max_sources: self.answer.max_sources,
                link_text_chars: self.answer.link_text_chars,
            },
            timeout: Duration::from_secs(self.request.timeout_secs),
        }
    }
}

/// `value` must lie in `1..=max`
fn check_range(name: &str, value: usize, max: usize) -> Result<()> {
    if value == 0 || value > max {
        return Err(AssistantError::ConfigError(format!(
            "{} must be between 1 and {}, got {}",
            name, max, value
        )));
    }
    Ok(())
}
