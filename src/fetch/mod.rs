pub mod download;
pub mod http;

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use std::pin::Pin;

pub use download::{format_bytes, FetchOutcome, Fetcher};
pub use http::HttpTransport;

/// Boxed stream of response body chunks
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// A successful response, ready to be streamed to disk
pub struct Download {
    /// Value of the Content-Length header, when the server sent one
    pub content_length: Option<u64>,
    pub body: BodyStream,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download")
            .field("content_length", &self.content_length)
            .field("body", &"Stream { ... }")
            .finish()
    }
}

/// Unified interface for issuing GET requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single GET for `url`.
    ///
    /// # Returns
    /// The response body for a success status. Transport failures and
    /// non-success statuses are errors naming the URL.
    async fn get(&self, url: &str) -> Result<Download>;
}
