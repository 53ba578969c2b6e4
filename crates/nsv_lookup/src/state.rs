use nsv_core::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// Backend already knew the article, or it was picked from the recent list.
    Existing,
    /// Backend scraped the article for this submission.
    Scraped,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveModal {
    #[default]
    Closed,
    ShowingExisting(Article),
    ShowingScraped(Article),
}

impl ActiveModal {
    pub fn open(kind: ModalKind, article: Article) -> Self {
        match kind {
            ModalKind::Existing => ActiveModal::ShowingExisting(article),
            ModalKind::Scraped => ActiveModal::ShowingScraped(article),
        }
    }

    pub fn article(&self) -> Option<&Article> {
        match self {
            ActiveModal::Closed => None,
            ActiveModal::ShowingExisting(a) | ActiveModal::ShowingScraped(a) => Some(a),
        }
    }

    pub fn kind(&self) -> Option<ModalKind> {
        match self {
            ActiveModal::Closed => None,
            ActiveModal::ShowingExisting(_) => Some(ModalKind::Existing),
            ActiveModal::ShowingScraped(_) => Some(ModalKind::Scraped),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ActiveModal::Closed)
    }
}

/// Everything the front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub url_input: String,
    pub recent_articles: Vec<Article>,
    pub active_modal: ActiveModal,
    pub detail_panel_open: bool,
    pub last_error: Option<String>,
    /// A scraped article left the modal before being closed, so the recent
    /// list still owes it one refresh.
    pub refresh_pending: bool,
}

impl ViewState {
    pub fn show(&mut self, kind: ModalKind, article: Article) {
        let previous = std::mem::replace(&mut self.active_modal, ActiveModal::open(kind, article));
        self.note_displaced(&previous);
        self.detail_panel_open = false;
    }

    /// Close the modal and return what was showing.
    pub fn dismiss(&mut self) -> ActiveModal {
        self.detail_panel_open = false;
        let previous = std::mem::take(&mut self.active_modal);
        self.note_displaced(&previous);
        previous
    }

    /// Clear and return the owed refresh.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_pending)
    }

    fn note_displaced(&mut self, previous: &ActiveModal) {
        if matches!(previous, ActiveModal::ShowingScraped(_)) {
            self.refresh_pending = true;
        }
    }
}
