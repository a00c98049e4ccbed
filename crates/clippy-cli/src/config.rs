//! Configuration file support

use clippy_core::SettingsService;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Token budget used when the config leaves it unset
pub const DEFAULT_TOKENS: u32 = 150;

/// Persisted settings for clippy-chat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat-completions URL
    pub api_endpoint: Option<String>,
    /// `max_tokens` sent with every request
    pub tokens: Option<u32>,
    /// Set when a key has been saved with `--set-key`
    pub has_key: bool,
}

/// Directory holding the config file and the stored key
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("clippy-chat")
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("CLIPPY_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        config_dir().join("config.toml")
    }

    /// Load config from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            api_endpoint: None,
            tokens: Some(DEFAULT_TOKENS),
            has_key: false,
        };

        default_config.save_to(&path)?;
        Ok(path)
    }
}

impl SettingsService for Config {
    fn has_key(&self) -> bool {
        self.has_key
    }

    fn api_endpoint(&self) -> Option<String> {
        self.api_endpoint.clone()
    }

    fn tokens(&self) -> u32 {
        self.tokens.unwrap_or(DEFAULT_TOKENS)
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# clippy-chat configuration file
# Place at ~/.config/clippy-chat/config.toml (Linux), or set CLIPPY_CONFIG_PATH

# OpenAI-compatible chat-completions URL
api_endpoint = "https://api.openai.com/v1/chat/completions"

# max_tokens sent with every request
tokens = 150

# Managed by --set-key / --forget-key
has_key = false
"#
}
