use std::path::PathBuf;
use thiserror::Error;

/// Main error type for piper-fetch
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/piper-fetch/config.toml\n- Paths may also be given with --voices and --dest\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("Failed to create directory {path}: {source}\n\nTroubleshooting:\n- Check write permissions on the destination root\n- Point `destination` in config (or --dest) at a writable location")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}\n\nTroubleshooting:\n- Check that the system TLS library (OpenSSL) is installed\n- Run with RUST_LOG=debug for more details")]
    Client(String),

    #[error("{reason}")]
    Http { url: String, reason: String },

    #[error("Response status code does not indicate success: {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// URL the error relates to, if it came from a network request
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Http { url, .. } | Self::Status { url, .. } => Some(url),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
