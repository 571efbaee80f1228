//! Runtime configuration.
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. A missing API key is not an error here: only the live
//! endpoint needs it, and it reports the absence per request.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{TopicLensError, TopicLensResult};
use crate::model::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "topiclens.toml";

/// Deployment environment; development responses carry error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Provider credential; usually supplied through `GEMINI_API_KEY`.
    pub api_key: Option<String>,
    pub name: String,
    pub api_base: String,
    pub answer_timeout_secs: u64,
    pub topic_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Artificial latency before a demo response.
    pub delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            name: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            answer_timeout_secs: 30,
            topic_timeout_secs: 15,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}

impl Config {
    /// Load configuration from file with environment overrides.
    ///
    /// `path` wins over `TOPICLENS_CONFIG`; either must name an existing
    /// file. Without both, `topiclens.toml` is read when present and the
    /// defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> TopicLensResult<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env::var("TOPICLENS_CONFIG").ok().map(PathBuf::from));

        let mut config = match explicit {
            Some(config_path) => {
                if !config_path.exists() {
                    return Err(TopicLensError::config(format!(
                        "config file not found: {}",
                        config_path.display()
                    )));
                }
                Self::from_file(&config_path)?
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    Self::from_file(&config_path)?
                } else {
                    tracing::debug!(
                        "Config file not found at {} - using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> TopicLensResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml(contents: &str) -> TopicLensResult<Self> {
        toml::from_str(contents)
            .map_err(|e| TopicLensError::config(format!("invalid config file: {}", e)))
    }

    /// Apply environment overrides through a lookup function.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.model.api_key = Some(key);
        }
        if let Some(model) = lookup("TOPICLENS_MODEL") {
            self.model.name = model;
        }
        if let Some(base) = lookup("TOPICLENS_API_BASE") {
            self.model.api_base = base;
        }
        if let Some(env_name) = lookup("TOPICLENS_ENV") {
            match Environment::parse(&env_name) {
                Some(environment) => self.environment = environment,
                None => tracing::warn!("Ignoring unknown TOPICLENS_ENV value '{}'", env_name),
            }
        }
        if let Some(host) = lookup("TOPICLENS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TOPICLENS_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(delay) = lookup("TOPICLENS_DEMO_DELAY_MS").and_then(|d| d.parse().ok()) {
            self.demo.delay_ms = delay;
        }
    }

    /// The configured API key, if any and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.model
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn answer_timeout(&self) -> Duration {
        Duration::from_secs(self.model.answer_timeout_secs)
    }

    pub fn topic_timeout(&self) -> Duration {
        Duration::from_secs(self.model.topic_timeout_secs)
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.demo.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3030);
        assert_eq!(config.answer_timeout(), Duration::from_secs(30));
        assert_eq!(config.topic_timeout(), Duration::from_secs(15));
        assert_eq!(config.demo_delay(), Duration::from_millis(1500));
        assert!(config.api_key().is_none());
        assert!(!config.is_development());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            environment = "development"

            [model]
            name = "gemini-1.5-pro"
            topic_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert!(config.is_development());
        assert_eq!(config.model.name, "gemini-1.5-pro");
        assert_eq!(config.model.answer_timeout_secs, 30);
        assert_eq!(config.topic_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("server = 3"),
            Err(TopicLensError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let missing = std::env::temp_dir()
            .join(format!("topiclens-config-{}", uuid::Uuid::new_v4()))
            .join("topiclens.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(TopicLensError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_path_is_read() {
        let dir = std::env::temp_dir().join(format!("topiclens-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.toml");
        fs::write(&path, "[demo]\ndelay_ms = 42\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.demo.delay_ms, 42);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "secret"),
            ("TOPICLENS_ENV", "dev"),
            ("TOPICLENS_PORT", "8080"),
            ("TOPICLENS_DEMO_DELAY_MS", "0"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_key(), Some("secret"));
        assert!(config.is_development());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.demo_delay(), Duration::ZERO);
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let mut config = Config::default();
        config.model.api_key = Some("   ".into());
        assert!(config.api_key().is_none());
    }
}
