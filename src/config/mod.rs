//! Configuration module for piper-fetch
//!
//! Loads config from `$XDG_CONFIG_HOME/piper-fetch/config.toml` or `~/.config/piper-fetch/config.toml`.
//! Falls back to built-in defaults if the file doesn't exist.
//! Partial configs are merged with defaults using serde's default attributes.
//!
//! # Example
//!
//! ```no_run
//! use piper_fetch::config::Config;
//!
//! let config = Config::load(None).expect("Failed to load config");
//! println!("Voices file: {}", config.voices_file.display());
//! println!("Destination: {}", config.destination.display());
//! ```

pub mod schema;

pub use schema::{Config, HttpConfig};
