pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod voices;
pub mod workflow;

pub use error::{FetchError, Result};
