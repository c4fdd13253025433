//! Entry point shared by the binary: config resolution, dry runs, and the
//! top-level catch that keeps failures from becoming a non-zero exit.

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::fetch::{Fetcher, HttpTransport};
use crate::workflow::{self, PlannedAsset};
use std::path::PathBuf;

/// Command-line overrides on top of the loaded config
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config: Option<PathBuf>,
    pub voices: Option<PathBuf>,
    pub dest: Option<PathBuf>,
    pub dry_run: bool,
}

/// Run the whole workflow, reporting rather than propagating any failure.
///
/// Returns the error that ended the run early, if there was one.
pub async fn run_reported(options: Options) -> Option<FetchError> {
    match execute(options).await {
        Ok(()) => None,
        Err(e) => {
            tracing::error!("Run aborted: {e}");
            println!("An error occurred: {e}");
            Some(e)
        }
    }
}

/// Load config, apply overrides, then download (or list, for a dry run)
pub async fn execute(options: Options) -> Result<()> {
    let config = resolve_config(&options)?;
    tracing::debug!("Using config: {config:?}");

    if options.dry_run {
        return dry_run(&config);
    }

    let transport = HttpTransport::new(&config.http)?;
    let fetcher = Fetcher::new(transport).with_progress(config.http.show_progress);

    workflow::run(&config, &fetcher).await?;
    Ok(())
}

fn resolve_config(options: &Options) -> Result<Config> {
    let mut config = Config::load(options.config.as_deref())?;
    if let Some(voices) = &options.voices {
        config.voices_file.clone_from(voices);
    }
    if let Some(dest) = &options.dest {
        config.destination.clone_from(dest);
    }
    Ok(config)
}

fn dry_run(config: &Config) -> Result<()> {
    let Some(planned) = workflow::plan(config)? else {
        println!("Markdown file not found: {}", config.voices_file.display());
        return Ok(());
    };

    if planned.is_empty() {
        println!("No file URLs found in {}.", config.voices_file.display());
        return Ok(());
    }

    for PlannedAsset {
        asset,
        destination,
        present,
    } in &planned
    {
        match destination {
            None => println!("skip     {}", asset.file_name),
            Some(path) if *present => println!("present  {}", path.display()),
            Some(path) => println!("fetch    {} -> {}", asset.url, path.display()),
        }
    }

    let pending = planned
        .iter()
        .filter(|p| p.destination.is_some() && !p.present)
        .count();
    println!("{pending} of {} assets would be downloaded.", planned.len());

    Ok(())
}
