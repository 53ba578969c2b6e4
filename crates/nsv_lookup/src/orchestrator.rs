use std::sync::Arc;

use nsv_core::{Article, ArticleApi, Error, Result};
use tracing::{info, warn};

use crate::state::ModalKind;

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Existing(Article),
    Scraped(Article),
}

impl LookupOutcome {
    pub fn kind(&self) -> ModalKind {
        match self {
            LookupOutcome::Existing(_) => ModalKind::Existing,
            LookupOutcome::Scraped(_) => ModalKind::Scraped,
        }
    }

    pub fn into_article(self) -> Article {
        match self {
            LookupOutcome::Existing(a) | LookupOutcome::Scraped(a) => a,
        }
    }
}

/// Decides between reusing a known article and asking the backend to scrape.
pub struct LookupOrchestrator {
    api: Arc<dyn ArticleApi>,
}

impl LookupOrchestrator {
    pub fn new(api: Arc<dyn ArticleApi>) -> Self {
        Self { api }
    }

    pub async fn resolve(&self, url: &str) -> Result<LookupOutcome> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::url_required());
        }

        info!("🔎 Checking whether {} was already scraped", url);
        match self.api.find_by_url(url).await {
            Ok(Some(article)) => {
                info!("📰 Found existing article: {}", article.title);
                return Ok(LookupOutcome::Existing(article));
            }
            Ok(None) => {}
            // unreachable lookups count as "not found"
            Err(e) => warn!("⚠️ Existence check for {} failed: {}", url, e),
        }

        info!("🦗 Scraping {} via {}", url, self.api.name());
        let article = self.api.scrape(url).await?;
        info!("✨ Scraped article: {}", article.title);
        Ok(LookupOutcome::Scraped(article))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsv_client::MemoryBackend;

    fn known(url: &str) -> Article {
        Article {
            url: url.to_string(),
            title: "Known".to_string(),
            trust_score: Some(0.9),
            ..Article::default()
        }
    }

    #[tokio::test]
    async fn test_empty_url_makes_no_calls() {
        let backend = Arc::new(MemoryBackend::new());
        let orchestrator = LookupOrchestrator::new(backend.clone());

        for input in ["", "   "] {
            let err = orchestrator.resolve(input).await.unwrap_err();
            assert_eq!(err.to_string(), "URL is required");
        }
        assert_eq!(backend.calls().await.total(), 0);
    }

    #[tokio::test]
    async fn test_existing_article_skips_scrape() {
        let backend = Arc::new(MemoryBackend::new().with_article(known("http://test.com/a")));
        let orchestrator = LookupOrchestrator::new(backend.clone());

        let outcome = orchestrator.resolve("http://test.com/a").await.unwrap();
        assert_eq!(outcome.kind(), ModalKind::Existing);
        assert_eq!(outcome.into_article().title, "Known");
        assert!(backend.calls().await.scrapes.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_article_is_scraped_once() {
        let backend = Arc::new(MemoryBackend::new());
        let orchestrator = LookupOrchestrator::new(backend.clone());

        let outcome = orchestrator.resolve("example.com/a").await.unwrap();
        assert_eq!(outcome.kind(), ModalKind::Scraped);

        let calls = backend.calls().await;
        assert_eq!(calls.lookups, vec!["example.com/a".to_string()]);
        assert_eq!(calls.scrapes, vec!["example.com/a".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_lookup_falls_through_to_scrape() {
        let backend = Arc::new(MemoryBackend::new().fail_lookups("connection reset"));
        let orchestrator = LookupOrchestrator::new(backend.clone());

        let outcome = orchestrator.resolve("example.com/a").await.unwrap();
        assert_eq!(outcome.kind(), ModalKind::Scraped);
        assert_eq!(backend.calls().await.scrapes.len(), 1);
    }

    #[tokio::test]
    async fn test_scrape_failure_is_returned() {
        let backend = Arc::new(MemoryBackend::new().fail_scrapes("Failed to fetch article"));
        let orchestrator = LookupOrchestrator::new(backend);

        let err = orchestrator.resolve("example.com/a").await.unwrap_err();
        assert_eq!(err, Error::Remote("Failed to fetch article".to_string()));
    }
}
