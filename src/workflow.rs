//! One pass over `VOICES.md`: extract, resolve, fetch.
//!
//! Per-asset failures are reported and the loop moves on. Failures that
//! prevent the run itself (unreadable document, unwritable destination
//! root) are returned to the caller.

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::fetch::{format_bytes, FetchOutcome, Fetcher, Transport};
use crate::voices::{ensure_language_dir, extract_urls, VoiceAsset};
use std::fs;
use std::path::PathBuf;

/// What happened to one asset URL
#[derive(Debug)]
pub enum AssetStatus {
    /// File name had no language code; nothing was requested or created
    Skipped,
    AlreadyExists { path: PathBuf },
    Downloaded { path: PathBuf, bytes: u64 },
    Failed { error: FetchError },
}

#[derive(Debug)]
pub struct AssetReport {
    pub asset: VoiceAsset,
    pub status: AssetStatus,
}

/// Per-run tallies plus the individual reports, in document order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<AssetReport>,
}

impl RunSummary {
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.count(|s| matches!(s, AssetStatus::Downloaded { .. }))
    }

    #[must_use]
    pub fn already_present(&self) -> usize {
        self.count(|s| matches!(s, AssetStatus::AlreadyExists { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, AssetStatus::Skipped))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, AssetStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&AssetStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.status)).count()
    }
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The markdown document does not exist
    MissingInput { path: PathBuf },
    /// The document has no asset URLs
    NoUrls { path: PathBuf },
    Completed(RunSummary),
}

/// Download every missing asset listed in `config.voices_file`.
///
/// Assets are processed strictly one after another.
pub async fn run<T: Transport>(config: &Config, fetcher: &Fetcher<T>) -> Result<RunOutcome> {
    println!("Starting download of Piper ONNX files...");

    let Some(urls) = load_urls(config)? else {
        return Ok(missing_input(config));
    };
    if urls.is_empty() {
        println!("No file URLs found in {}.", config.voices_file.display());
        return Ok(RunOutcome::NoUrls {
            path: config.voices_file.clone(),
        });
    }

    tracing::info!(
        "Found {} asset URLs in {}",
        urls.len(),
        config.voices_file.display()
    );

    let mut summary = RunSummary::default();

    for url in &urls {
        let asset = VoiceAsset::from_url(url);

        let Some(code) = asset.language_code.as_deref() else {
            println!(
                "Skipping file with unknown language format: {}",
                asset.file_name
            );
            summary.reports.push(AssetReport {
                asset,
                status: AssetStatus::Skipped,
            });
            continue;
        };

        // Not being able to create the directory is fatal for the whole run
        let dir = ensure_language_dir(&config.destination, code)?;
        let dest = dir.join(&asset.file_name);

        let status = match fetcher.fetch(&asset.url, &dest).await {
            Ok(FetchOutcome::AlreadyExists { path }) => {
                println!("File already exists: {}", path.display());
                AssetStatus::AlreadyExists { path }
            }
            Ok(FetchOutcome::Downloaded { path, bytes }) => {
                println!("Downloaded: {} ({})", path.display(), format_bytes(bytes));
                AssetStatus::Downloaded { path, bytes }
            }
            Err(error) => {
                tracing::warn!("Download of {} failed: {error}", asset.url);
                println!("Failed to download {}: {error}", asset.url);
                AssetStatus::Failed { error }
            }
        };

        summary.reports.push(AssetReport { asset, status });
    }

    tracing::info!(
        downloaded = summary.downloaded(),
        already_present = summary.already_present(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        "Run finished"
    );
    println!("Download complete.");

    Ok(RunOutcome::Completed(summary))
}

/// An asset as it would be handled by [`run`], without touching the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAsset {
    pub asset: VoiceAsset,
    /// `None` when the asset would be skipped
    pub destination: Option<PathBuf>,
    pub present: bool,
}

/// Resolve every asset in the document without downloading or creating anything.
///
/// Returns `None` when the document does not exist.
pub fn plan(config: &Config) -> Result<Option<Vec<PlannedAsset>>> {
    let Some(urls) = load_urls(config)? else {
        return Ok(None);
    };

    let planned = urls
        .iter()
        .map(|url| {
            let asset = VoiceAsset::from_url(url);
            let destination = asset.destination(&config.destination);
            let present = destination.as_deref().is_some_and(std::path::Path::is_file);
            PlannedAsset {
                asset,
                destination,
                present,
            }
        })
        .collect();

    Ok(Some(planned))
}

fn load_urls(config: &Config) -> Result<Option<Vec<String>>> {
    if !config.voices_file.is_file() {
        return Ok(None);
    }

    // Invalid UTF-8 (e.g. a Latin-1 voice name) is replaced, not rejected
    let raw = fs::read(&config.voices_file)?;
    let markdown = String::from_utf8_lossy(&raw);
    Ok(Some(extract_urls(&markdown)))
}

fn missing_input(config: &Config) -> RunOutcome {
    println!("Markdown file not found: {}", config.voices_file.display());
    RunOutcome::MissingInput {
        path: config.voices_file.clone(),
    }
}
