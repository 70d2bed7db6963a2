use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "claude-3-sonnet";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_API_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where to fetch events from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub events_url: String,
    pub timeout: Duration,
}

/// How to reach the completion API
#[derive(Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration for a full scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: SourceConfig,
    pub completion: CompletionConfig,
}

/// On-disk TOML configuration. Every key is optional; CLI flags and
/// environment variables take precedence over it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub events_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub api_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parse a TOML document
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| Error::Config(format!("{} is not a valid URL '{}': {}", name, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "{} must use http or https, got '{}'",
            name, other
        ))),
    }
}

impl SourceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_url("events_url", &self.events_url)?;
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

impl CompletionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api_key must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config("model must not be empty".to_string()));
        }
        if self.max_tokens == 0 {
            return Err(Error::Config("max_tokens must be greater than zero".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        validate_url("api_base_url", &self.api_base_url)
    }
}

/// Builder for creating configurations
///
/// Later setters win, so callers apply the config file first and then
/// environment and flag overrides.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    events_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    api_base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder from a parsed config file
    pub fn from_file(file: FileConfig) -> Self {
        Self {
            events_url: file.events_url,
            api_key: file.api_key,
            model: file.model,
            max_tokens: file.max_tokens,
            api_base_url: file.api_base_url,
            timeout: file.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Set the event source endpoint
    pub fn events_url(mut self, url: impl Into<String>) -> Self {
        self.events_url = Some(url.into());
        self
    }

    /// Set the completion API credential
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the output token budget
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the completion API base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn resolved_timeout(&self) -> Duration {
        self.timeout
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Build only the event source part; no credential needed
    pub fn build_source(&self) -> Result<SourceConfig> {
        let events_url = self.events_url.clone().ok_or_else(|| {
            Error::Config(
                "No events URL configured (use --events-url, EVENT_API_URL or events_url in the config file)"
                    .to_string(),
            )
        })?;
        let source = SourceConfig {
            events_url,
            timeout: self.resolved_timeout(),
        };
        source.validate()?;
        Ok(source)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        let source = self.build_source()?;
        let api_key = self.api_key.clone().ok_or_else(|| {
            Error::Config(
                "No API key configured (use --api-key, CLAUDE_API_KEY, ANTHROPIC_API_KEY or api_key in the config file)"
                    .to_string(),
            )
        })?;
        let completion = CompletionConfig {
            api_key,
            model: self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            api_base_url: self
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            timeout: self.resolved_timeout(),
        };
        completion.validate()?;
        Ok(Config { source, completion })
    }
}
