use clap::Parser;
use piper_fetch::app::{self, Options};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "piper-fetch")]
#[command(about = "Download the Piper voices listed in VOICES.md", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/piper-fetch/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Markdown document listing the voices
    #[arg(long)]
    voices: Option<PathBuf>,

    /// Destination root for language directories
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Show what would be downloaded without doing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Failures are reported inside; the exit status stays 0
    let _ = app::run_reported(Options {
        config: cli.config,
        voices: cli.voices,
        dest: cli.dest,
        dry_run: cli.dry_run,
    })
    .await;
}
