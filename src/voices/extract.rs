//! Asset URL extraction from a `VOICES.md` document.

use once_cell::sync::Lazy;
use regex::Regex;

/// Parenthesized `https://` URL ending in `.onnx` or `.onnx.json`.
///
/// The URL body may not contain parentheses or whitespace, so a match never
/// spans two links.
static ASSET_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((https://[^()\s]*?\.(?:onnx|onnx\.json))\)").unwrap());

/// Extract asset URLs from markdown text, in document order.
///
/// This is a textual scan, not a markdown parse: any parenthesized substring
/// with a recognized suffix is captured, including ones in plain prose.
/// Duplicates are kept.
#[must_use]
pub fn extract_urls(markdown: &str) -> Vec<String> {
    ASSET_URL_REGEX
        .captures_iter(markdown)
        .map(|caps| caps[1].to_string())
        .collect()
}
