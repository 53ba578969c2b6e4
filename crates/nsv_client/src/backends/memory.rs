use async_trait::async_trait;
use nsv_core::{Article, ArticleApi, ArticleId, Error, Result};
use tokio::sync::RwLock;
use tracing::debug;

/// How many articles `latest_articles` hands back.
pub const LATEST_LIMIT: usize = 10;

/// Requests the backend has seen, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallLog {
    pub latest: usize,
    pub lookups: Vec<String>,
    pub scrapes: Vec<String>,
}

impl CallLog {
    pub fn total(&self) -> usize {
        self.latest + self.lookups.len() + self.scrapes.len()
    }
}

#[derive(Debug, Default)]
struct MemoryStore {
    // newest first
    articles: Vec<Article>,
    next_id: i64,
    calls: CallLog,
    scrape_error: Option<Error>,
    listing_error: Option<String>,
    lookup_error: Option<String>,
}

impl MemoryStore {
    fn upsert(&mut self, mut article: Article) -> Article {
        if let Some(pos) = self.articles.iter().position(|a| a.url == article.url) {
            let existing = self.articles.remove(pos);
            if article.id.is_none() {
                article.id = existing.id;
            }
        }
        if article.id.is_none() {
            self.next_id += 1;
            article.id = Some(ArticleId::Number(self.next_id));
        }
        self.articles.insert(0, article.clone());
        article
    }
}

/// In-process backend for offline sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: RwLock<MemoryStore>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an already scraped article. Later seeds count as more recent.
    pub fn with_article(mut self, article: Article) -> Self {
        self.store.get_mut().upsert(article);
        self
    }

    /// Make every scrape fail with a backend error carrying `message`.
    pub fn fail_scrapes(mut self, message: &str) -> Self {
        self.store.get_mut().scrape_error = Some(Error::Remote(message.to_string()));
        self
    }

    /// Make every scrape fail as if the backend were unreachable.
    pub fn fail_scrapes_transport(mut self, message: &str) -> Self {
        self.store.get_mut().scrape_error = Some(Error::Transport(message.to_string()));
        self
    }

    /// Make listing fail as if the backend were unreachable.
    pub fn fail_listing(mut self, message: &str) -> Self {
        self.store.get_mut().listing_error = Some(message.to_string());
        self
    }

    /// Make existence checks fail as if the backend were unreachable.
    pub fn fail_lookups(mut self, message: &str) -> Self {
        self.store.get_mut().lookup_error = Some(message.to_string());
        self
    }

    pub async fn calls(&self) -> CallLog {
        self.store.read().await.calls.clone()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.articles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ArticleApi for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn latest_articles(&self) -> Result<Vec<Article>> {
        let mut store = self.store.write().await;
        store.calls.latest += 1;
        if let Some(message) = &store.listing_error {
            return Err(Error::Transport(message.clone()));
        }
        Ok(store.articles.iter().take(LATEST_LIMIT).cloned().collect())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<Article>> {
        let mut store = self.store.write().await;
        store.calls.lookups.push(url.to_string());
        if let Some(message) = &store.lookup_error {
            return Err(Error::Transport(message.clone()));
        }
        Ok(store.articles.iter().find(|a| a.url == url).cloned())
    }

    async fn scrape(&self, url: &str) -> Result<Article> {
        let mut store = self.store.write().await;
        store.calls.scrapes.push(url.to_string());
        if let Some(e) = &store.scrape_error {
            return Err(e.clone());
        }
        let article = store.upsert(Article {
            url: url.to_string(),
            title: url.to_string(),
            ..Article::default()
        });
        debug!("Stored scraped article {} as {:?}", url, article.id);
        Ok(article)
    }
}
