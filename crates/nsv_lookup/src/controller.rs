use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nsv_core::{ArticleApi, Error};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::loader::RecentArticlesLoader;
use crate::orchestrator::LookupOrchestrator;
use crate::sequence::RequestSequence;
use crate::state::{ActiveModal, ModalKind, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    /// The modal now shows the resolved article.
    Opened(ModalKind),
    /// `last_error` now holds the error's message.
    Failed(Error),
    /// A newer action superseded this submission; its result was dropped.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseEffect {
    NothingOpen,
    Dismissed,
    /// The recent list was re-fetched because a freshly scraped article was
    /// closed, or was replaced by another article before this close.
    Refreshed,
}

/// Owns the lookup view state for one session.
///
/// All methods take `&self`, so several user actions may be in flight at
/// once. State is never locked across a backend call; each submission holds
/// a ticket and only the newest one is allowed to publish its result.
pub struct ArticleLookupController {
    orchestrator: LookupOrchestrator,
    loader: RecentArticlesLoader,
    state: RwLock<ViewState>,
    submissions: RequestSequence,
    refreshes: RequestSequence,
    mounted: AtomicBool,
}

impl ArticleLookupController {
    pub fn new(api: Arc<dyn ArticleApi>) -> Self {
        Self {
            orchestrator: LookupOrchestrator::new(api.clone()),
            loader: RecentArticlesLoader::new(api),
            state: RwLock::new(ViewState::default()),
            submissions: RequestSequence::new(),
            refreshes: RequestSequence::new(),
            mounted: AtomicBool::new(false),
        }
    }

    /// Initial load of the recent list. Only the first call does any work.
    pub async fn mount(&self) -> bool {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.refresh_recent().await;
        true
    }

    /// Re-fetch the recent list, replacing it only if no newer refresh won.
    pub async fn refresh_recent(&self) -> bool {
        let ticket = self.refreshes.next();
        let Some(articles) = self.loader.load().await else {
            return false;
        };

        let mut state = self.state.write().await;
        if !self.refreshes.is_latest(ticket) {
            debug!("Dropping stale recent-articles response");
            return false;
        }
        state.recent_articles = articles;
        true
    }

    pub async fn set_url_input(&self, url: &str) {
        self.state.write().await.url_input = url.to_string();
    }

    /// Submit whatever is currently in the input field.
    pub async fn submit(&self) -> SubmitStatus {
        let url = self.state.read().await.url_input.clone();
        self.run_submission(url).await
    }

    /// Type `url` into the input field and submit it.
    pub async fn submit_url(&self, url: &str) -> SubmitStatus {
        self.set_url_input(url).await;
        self.run_submission(url.to_string()).await
    }

    async fn run_submission(&self, url: String) -> SubmitStatus {
        let ticket = self.submissions.next();
        let result = self.orchestrator.resolve(&url).await;

        let (status, refresh) = {
            let mut state = self.state.write().await;
            if !self.submissions.is_latest(ticket) {
                debug!("Dropping stale result for {}", url);
                return SubmitStatus::Discarded;
            }

            match result {
                Ok(outcome) => {
                    let kind = outcome.kind();
                    state.last_error = None;
                    state.show(kind, outcome.into_article());
                    // a replaced scraped article is refreshed on the next close
                    (SubmitStatus::Opened(kind), false)
                }
                Err(e) => {
                    info!("❌ Lookup of {:?} failed: {}", url, e);
                    state.dismiss();
                    state.last_error = Some(e.to_string());
                    (SubmitStatus::Failed(e), state.take_refresh())
                }
            }
        };

        // nothing is left open to close, so settle the owed refresh now
        if refresh {
            info!("🔄 Refreshing recent articles after a scraped article was replaced");
            self.refresh_recent().await;
        }
        status
    }

    /// Show an entry of the recent list. No request is made.
    pub async fn open_recent(&self, index: usize) -> bool {
        let mut state = self.state.write().await;
        let Some(article) = state.recent_articles.get(index).cloned() else {
            return false;
        };
        // supersede any submission still in flight
        self.submissions.next();
        state.show(ModalKind::Existing, article);
        true
    }

    /// Flip the detail panel of the open modal. Returns the new value.
    pub async fn toggle_detail_panel(&self) -> bool {
        let mut state = self.state.write().await;
        if !state.active_modal.is_open() {
            return false;
        }
        state.detail_panel_open = !state.detail_panel_open;
        state.detail_panel_open
    }

    pub async fn close_modal(&self) -> CloseEffect {
        let (previous, refresh) = {
            let mut state = self.state.write().await;
            let previous = state.dismiss();
            (previous, state.take_refresh())
        };

        if refresh {
            info!("🔄 Refreshing recent articles after closing a scraped article");
            self.refresh_recent().await;
            return CloseEffect::Refreshed;
        }
        match previous {
            ActiveModal::Closed => CloseEffect::NothingOpen,
            _ => CloseEffect::Dismissed,
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }
}
