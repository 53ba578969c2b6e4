//! Plain-text rendering of the lookup view.

use std::fmt::Write;

use nsv_core::{Article, TrustVerdict};

use crate::state::{ActiveModal, ViewState};

const NOT_AVAILABLE: &str = "N/A";
const EXCERPT_CHARS: usize = 280;

pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Trust score with its verdict, or "N/A" when the backend has no score.
pub fn format_trust(article: &Article) -> String {
    match article.trust_verdict() {
        TrustVerdict::Unknown => NOT_AVAILABLE.to_string(),
        verdict => format!("{} ({})", format_metric(article.trust_score), verdict),
    }
}

pub fn format_publish_date(article: &Article) -> String {
    match (article.published_on(), article.publish_date.as_deref()) {
        (Some(date), _) => date.format("%Y-%m-%d").to_string(),
        (None, Some(raw)) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

fn excerpt(content: &str) -> String {
    let content = content.trim();
    if content.chars().count() <= EXCERPT_CHARS {
        return content.to_string();
    }
    let cut: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}

pub fn list_item(index: usize, article: &Article) -> String {
    format!(
        "[{}] {} | trust: {}",
        index + 1,
        or_na(Some(&article.title)),
        format_trust(article)
    )
}

pub fn summary(article: &Article) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Title: {}", or_na(Some(&article.title)));
    let _ = writeln!(out, "Author: {}", or_na(article.author.as_deref()));
    let _ = writeln!(out, "Publish Date: {}", format_publish_date(article));
    let _ = writeln!(out, "Status: {}", article.status);
    let _ = writeln!(out, "Trust Score: {}", format_trust(article));
    let _ = writeln!(out, "Content Consistency: {}", format_metric(article.content_consistency));
    let _ = writeln!(out, "Sentiment Subjectivity: {}", format_metric(article.sentiment_subjectivity));
    let _ = writeln!(out, "URL: {}", or_na(Some(&article.url)));
    out
}

pub fn details(article: &Article) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ML Model Prediction: {}", format_metric(article.ml_model_prediction));
    let _ = writeln!(out, "Source Credibility: {}", format_metric(article.source_credibility));
    if let Some(id) = &article.id {
        let _ = writeln!(out, "ID: {}", id);
    }
    let text = excerpt(&article.content);
    if !text.is_empty() {
        let _ = writeln!(out, "\n{}", text);
    }
    out
}

/// Whole-screen rendering: error line, modal (if open) and the recent list.
pub fn render_view(state: &ViewState) -> String {
    let mut out = String::new();

    if let Some(err) = &state.last_error {
        let _ = writeln!(out, "! {}\n", err);
    }

    if let Some(article) = state.active_modal.article() {
        let heading = match state.active_modal {
            ActiveModal::ShowingScraped(_) => "Article Details (freshly scraped)",
            _ => "Article Details",
        };
        let _ = writeln!(out, "== {} ==", heading);
        out.push_str(&summary(article));
        if state.detail_panel_open {
            let _ = writeln!(out, "-- More details --");
            out.push_str(&details(article));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Latest Articles");
    if state.recent_articles.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (i, article) in state.recent_articles.iter().enumerate() {
        let _ = writeln!(out, "  {}", list_item(i, article));
    }
    out
}
