use std::sync::Arc;

use nsv_core::{Article, ArticleApi};
use tracing::{error, info};

/// Fetches the recent-articles list. Failures are logged, never surfaced.
pub struct RecentArticlesLoader {
    api: Arc<dyn ArticleApi>,
}

impl RecentArticlesLoader {
    pub fn new(api: Arc<dyn ArticleApi>) -> Self {
        Self { api }
    }

    pub async fn load(&self) -> Option<Vec<Article>> {
        match self.api.latest_articles().await {
            Ok(articles) => {
                info!("📰 Loaded {} recent articles", articles.len());
                Some(articles)
            }
            Err(e) => {
                error!("Failed to load recent articles: {}", e);
                None
            }
        }
    }
}
