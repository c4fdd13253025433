//! Destination path resolution for voice assets.

use crate::error::{FetchError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Leading `word_word` token followed by a hyphen, e.g. `en_US-`
static LANGUAGE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+_\w+)-").unwrap());

/// A voice asset referenced from the markdown document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceAsset {
    pub url: String,
    pub file_name: String,
    pub language_code: Option<String>,
}

impl VoiceAsset {
    /// Resolve file name and language code from an asset URL
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let file_name = file_name(url);
        Self {
            url: url.to_string(),
            file_name: file_name.to_string(),
            language_code: language_code(file_name).map(str::to_string),
        }
    }

    /// `<root>/<language_code>`, or `None` for assets without a language code
    #[must_use]
    pub fn language_dir(&self, root: &Path) -> Option<PathBuf> {
        self.language_code.as_deref().map(|code| root.join(code))
    }

    /// `<root>/<language_code>/<file_name>`, or `None` for assets without a language code
    #[must_use]
    pub fn destination(&self, root: &Path) -> Option<PathBuf> {
        self.language_dir(root).map(|dir| dir.join(&self.file_name))
    }
}

/// Last `/`-separated segment of a URL. No percent-decoding is done.
#[must_use]
pub fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Language code at the start of a file name, e.g. `en_US` for `en_US-amy-medium.onnx`
#[must_use]
pub fn language_code(file_name: &str) -> Option<&str> {
    LANGUAGE_CODE_REGEX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Create `<root>/<code>` (and any missing ancestors) if needed
pub fn ensure_language_dir(root: &Path, code: &str) -> Result<PathBuf> {
    let dir = root.join(code);
    fs::create_dir_all(&dir).map_err(|source| FetchError::Directory {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
