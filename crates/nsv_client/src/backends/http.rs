use std::fmt;

use async_trait::async_trait;
use nsv_core::{Article, ArticleApi, Error, ErrorBody, Result, ScrapeRequest};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;

/// Talks to the NSV REST backend over HTTP.
pub struct HttpBackend {
    client: Client,
    root: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let root = config.api_root()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, root })
    }

    fn latest_url(&self) -> String {
        format!("{}/latest-articles", self.root)
    }

    fn article_url(&self, url: &str) -> String {
        format!("{}/articles/{}", self.root, urlencoding::encode(url))
    }

    fn scrape_url(&self) -> String {
        format!("{}/articles/scrape", self.root)
    }
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("client", &"<reqwest::Client>")
            .field("root", &self.root)
            .finish()
    }
}

/// Turn a non-success response into the backend's own error message.
async fn remote_error(response: Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody { error: Some(message) }) => Error::Remote(message),
        _ => Error::Remote(status_text(status)),
    }
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

#[async_trait]
impl ArticleApi for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn latest_articles(&self) -> Result<Vec<Article>> {
        let response = self.client.get(self.latest_url()).send().await?;
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }
        let articles = response.json::<Vec<Article>>().await?;
        debug!("Fetched {} latest articles", articles.len());
        Ok(articles)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Article>> {
        let response = self.client.get(self.article_url(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("Lookup for {} answered {}", url, status);
            return Ok(None);
        }
        Ok(Some(response.json::<Article>().await?))
    }

    async fn scrape(&self, url: &str) -> Result<Article> {
        info!("🦗 Requesting scrape of {}", url);
        let request = ScrapeRequest { url: url.to_string() };
        let response = self
            .client
            .post(self.scrape_url())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = remote_error(response).await;
            warn!("Scrape of {} rejected: {}", url, err);
            return Err(err);
        }
        Ok(response.json::<Article>().await?)
    }
}
