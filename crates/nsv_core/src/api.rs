use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

/// Remote article service the lookup controller talks to.
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch the most recently scraped articles, in backend order
    async fn latest_articles(&self) -> Result<Vec<Article>>;

    /// Look up an already scraped article by its source URL.
    ///
    /// A non-success response means "not known" and yields `Ok(None)`;
    /// only transport failures are errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<Article>>;

    /// Ask the backend to scrape and score the article at `url`
    async fn scrape(&self, url: &str) -> Result<Article>;
}
