//! Page retrieval.
//!
//! [`PageFetcher`] is the seam between the search orchestrator and the
//! network. [`HttpFetcher`] is the production implementation: one shared
//! `reqwest::Client` with a per-request timeout. No retries are attempted;
//! any failure is returned to the orchestrator, which aborts the search.

use anyhow::{Context, Result};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::time::Duration;
use wikilinks_core::error::FetchError;
use wikilinks_core::models::ArticleId;

use crate::config::{Config, HttpConfig};

/// Characters escaped when an article id is placed in a URL path.
/// `/` is kept: ids such as `AC/DC` are addressed literally.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Retrieves the raw content of one article.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, id: &ArticleId) -> Result<String, FetchError>;
}

/// Fetches articles over HTTP(S) from `<base_url>/<id>`.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, http: &HttpConfig) -> Result<Self> {
        let timeout = Duration::from_secs(http.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(http.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.corpus.base_url(), &config.http)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, id: &ArticleId) -> Result<String, FetchError> {
        let url = article_url(&self.base_url, id);
        let connection = |e: reqwest::Error| FetchError::Connection {
            url: url.clone(),
            message: if e.is_timeout() {
                format!("request timed out after {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            },
        };

        let response = self.client.get(&url).send().await.map_err(connection)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(connection)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Request URL for `id`, with the id percent-encoded.
pub fn article_url(base_url: &str, id: &ArticleId) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(id.as_str(), PATH_SEGMENT)
    )
}

/// Human-readable URL for `id`, as printed and logged.
pub fn display_url(base_url: &str, id: &ArticleId) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}
