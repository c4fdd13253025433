use crate::error::Result;
use crate::fetch::Transport;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const PB_STYLE: &str =
    "{msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.progress_chars("█▓▒░  "))
});

/// Result of fetching a single asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A regular file was already at the destination; nothing was requested
    AlreadyExists { path: PathBuf },
    /// The body was written to the destination
    Downloaded { path: PathBuf, bytes: u64 },
}

/// Sequential asset downloader over a [`Transport`]
pub struct Fetcher<T> {
    transport: T,
    show_progress: bool,
}

impl<T: Transport> Fetcher<T> {
    /// Create new fetcher
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            show_progress: false,
        }
    }

    /// Draw a terminal progress bar while downloading
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Download `url` to `dest` unless a file is already there.
    ///
    /// The destination is only created once the server has answered with a
    /// success status. It is written in place, so an interrupted transfer
    /// leaves a partial file that later calls report as `AlreadyExists`.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchOutcome> {
        if dest.is_file() {
            tracing::debug!("{} present, skipping request", dest.display());
            return Ok(FetchOutcome::AlreadyExists {
                path: dest.to_path_buf(),
            });
        }

        tracing::debug!("GET {url}");
        let download = self.transport.get(url).await?;

        let pb = self.progress_bar(download.content_length, dest);
        // No advisory lock: assets are written one at a time by a single process
        let mut file = fs::File::create(dest).await?;
        let mut written: u64 = 0;

        let mut body = download.body;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            pb.set_position(written);
        }

        file.flush().await?;
        drop(file);
        pb.finish_and_clear();

        tracing::info!("Wrote {} to {}", format_bytes(written), dest.display());
        Ok(FetchOutcome::Downloaded {
            path: dest.to_path_buf(),
            bytes: written,
        })
    }

    fn progress_bar(&self, len: Option<u64>, dest: &Path) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = len.map_or_else(ProgressBar::no_length, ProgressBar::new);
        if let Some(style) = PB_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        if let Some(name) = dest.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb
    }
}

/// Format bytes as human-readable string
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::Download;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Serves a fixed set of chunks, optionally failing part way through
    struct ChunkTransport {
        chunks: Vec<&'static str>,
        fail_after: Option<usize>,
        status: Option<u16>,
        calls: AtomicUsize,
    }

    impl ChunkTransport {
        fn ok(chunks: Vec<&'static str>) -> Self {
            Self {
                chunks,
                fail_after: None,
                status: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Transport for ChunkTransport {
        async fn get(&self, url: &str) -> Result<Download> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(status) = self.status {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }

            let mut items: Vec<Result<Bytes>> = self
                .chunks
                .iter()
                .map(|c| Ok(Bytes::from_static(c.as_bytes())))
                .collect();
            if let Some(n) = self.fail_after {
                items.truncate(n);
                items.push(Err(FetchError::Http {
                    url: url.to_string(),
                    reason: "connection reset".to_string(),
                }));
            }

            Ok(Download {
                content_length: None,
                body: Box::pin(futures_util::stream::iter(items)),
            })
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(63_201_294), "60.27 MB");
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
    }

    #[tokio::test]
    async fn test_fetch_writes_all_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("en_US-amy-low.onnx");
        let fetcher = Fetcher::new(ChunkTransport::ok(vec!["onnx", "-", "weights"]));

        let outcome = fetcher.fetch("https://x.org/en_US-amy-low.onnx", &dest).await.unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::Downloaded {
                path: dest.clone(),
                bytes: 12
            }
        );
        assert_eq!(std::fs::read(&dest).unwrap(), b"onnx-weights");
        assert_eq!(fetcher.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_existing_file_makes_no_request() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("en_US-amy-low.onnx");
        std::fs::write(&dest, "").unwrap();
        let fetcher = Fetcher::new(ChunkTransport::ok(vec!["new"]));

        let outcome = fetcher.fetch("https://x.org/en_US-amy-low.onnx", &dest).await.unwrap();

        assert_eq!(outcome, FetchOutcome::AlreadyExists { path: dest.clone() });
        assert_eq!(fetcher.transport().calls.load(Ordering::SeqCst), 0);
        // Existing content is left alone, even when empty
        assert_eq!(std::fs::read(&dest).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_fetch_status_error_creates_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("en_US-amy-low.onnx");
        let fetcher = Fetcher::new(ChunkTransport {
            status: Some(404),
            ..ChunkTransport::ok(vec![])
        });

        let result = fetcher.fetch("https://x.org/en_US-amy-low.onnx", &dest).await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_interrupted_fetch_leaves_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("en_US-amy-low.onnx");
        let fetcher = Fetcher::new(ChunkTransport {
            fail_after: Some(1),
            ..ChunkTransport::ok(vec!["part", "rest"])
        });

        let result = fetcher.fetch("https://x.org/en_US-amy-low.onnx", &dest).await;
        assert!(matches!(result, Err(FetchError::Http { .. })));
        assert_eq!(std::fs::read(&dest).unwrap(), b"part");

        // The partial file now counts as present
        let outcome = fetcher.fetch("https://x.org/en_US-amy-low.onnx", &dest).await.unwrap();
        assert!(matches!(outcome, FetchOutcome::AlreadyExists { .. }));
        assert_eq!(fetcher.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_directory_at_destination_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("en_US-amy-low.onnx");
        std::fs::create_dir(&dest).unwrap();
        let fetcher = Fetcher::new(ChunkTransport::ok(vec!["x"]));

        let result = fetcher.fetch("https://x.org/en_US-amy-low.onnx", &dest).await;
        assert!(matches!(result, Err(FetchError::Io(_))));
    }
}
