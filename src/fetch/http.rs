use crate::config::HttpConfig;
use crate::error::{FetchError, Result};
use crate::fetch::{Download, Transport};
use async_trait::async_trait;
use futures_util::StreamExt;
use std::time::Duration;

/// reqwest-backed transport with default redirect handling and no auth
pub struct HttpTransport {
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("client", &"Client { ... }")
            .finish()
    }
}

impl HttpTransport {
    /// Create new transport from config
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Download> {
        let response = self.client.get(url).send().await.map_err(|e| FetchError::Http {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_length = response.content_length();
        let owned_url = url.to_string();
        let body = response.bytes_stream().map(move |chunk| {
            chunk.map_err(|e| FetchError::Http {
                url: owned_url.clone(),
                reason: e.to_string(),
            })
        });

        Ok(Download {
            content_length,
            body: Box::pin(body),
        })
    }
}
