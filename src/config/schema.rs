use crate::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_voices_file")]
    pub voices_file: PathBuf,
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout. Unset means the client never times out.
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

// Default value functions
fn default_voices_file() -> PathBuf {
    PathBuf::from("VOICES.md")
}
fn default_destination() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("piper")
        .join("voices")
}
fn default_user_agent() -> String {
    format!("piper-fetch/{}", env!("CARGO_PKG_VERSION"))
}
fn default_true() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: None,
            show_progress: default_true(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            voices_file: default_voices_file(),
            destination: default_destination(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from the default location.
    ///
    /// A missing file at the default location yields the built-in defaults.
    /// An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(FetchError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => {
                let path = config_path()?;
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    tracing::debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|e| match e {
            FetchError::Config(msg) => FetchError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a TOML document into a config
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| FetchError::Config(format!("Failed to parse config: {e}")))
    }
}

/// Get default config file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config)
    } else {
        dirs::home_dir()
            .ok_or_else(|| FetchError::Config("Could not determine home directory".to_string()))?
            .join(".config")
    };

    Ok(config_dir.join("piper-fetch").join("config.toml"))
}
