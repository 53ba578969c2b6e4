use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Scores at or above this value are considered trustworthy.
pub const TRUST_THRESHOLD: f64 = 0.5;

/// Backend-assigned identifier. The backend may send either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(n) => write!(f, "{}", n),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArticleStatus {
    #[default]
    Unverified,
    Verified,
    Other(String),
}

impl ArticleStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ArticleStatus::Unverified => "unverified",
            ArticleStatus::Verified => "verified",
            ArticleStatus::Other(s) => s,
        }
    }
}

impl From<&str> for ArticleStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unverified" => ArticleStatus::Unverified,
            "verified" => ArticleStatus::Verified,
            _ => ArticleStatus::Other(s.to_string()),
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ArticleStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ArticleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(ArticleStatus::from).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustVerdict {
    Trusted,
    Untrusted,
    Unknown,
}

impl TrustVerdict {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s.is_nan() => TrustVerdict::Unknown,
            Some(s) if s >= TRUST_THRESHOLD => TrustVerdict::Trusted,
            Some(_) => TrustVerdict::Untrusted,
            None => TrustVerdict::Unknown,
        }
    }
}

impl fmt::Display for TrustVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrustVerdict::Trusted => "trusted",
            TrustVerdict::Untrusted => "untrusted",
            TrustVerdict::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// A scraped article together with the metrics the backend computed for it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub trust_score: Option<f64>,
    #[serde(default)]
    pub content_consistency: Option<f64>,
    #[serde(default)]
    pub sentiment_subjectivity: Option<f64>,
    #[serde(default)]
    pub ml_model_prediction: Option<f64>,
    #[serde(default)]
    pub source_credibility: Option<f64>,
}

impl Article {
    pub fn trust_verdict(&self) -> TrustVerdict {
        TrustVerdict::from_score(self.trust_score)
    }

    /// Calendar date of publication, if the backend sent one we can read.
    pub fn published_on(&self) -> Option<NaiveDate> {
        self.publish_date.as_deref().and_then(parse_publish_date)
    }
}

fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    // Flask renders datetimes as "Mon, 01 Jan 2024 00:00:00 GMT"
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(dt.date());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /articles/scrape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// Error payload the backend sends with non-success responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trust_threshold() {
        assert_eq!(TrustVerdict::from_score(Some(0.4999)), TrustVerdict::Untrusted);
        assert_eq!(TrustVerdict::from_score(Some(0.5)), TrustVerdict::Trusted);
        assert_eq!(TrustVerdict::from_score(Some(0.0)), TrustVerdict::Untrusted);
        assert_eq!(TrustVerdict::from_score(None), TrustVerdict::Unknown);
    }

    #[test]
    fn test_null_trust_score_is_absent_not_zero() {
        let article: Article = serde_json::from_value(json!({
            "title": "T",
            "trust_score": null
        }))
        .unwrap();
        assert_eq!(article.trust_score, None);
        assert_eq!(article.trust_verdict(), TrustVerdict::Unknown);
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let article: Article = serde_json::from_value(json!({
            "id": 42,
            "url": "https://example.com/a",
            "title": "T",
            "author": "A",
            "content": null,
            "publish_date": "2024-01-01",
            "status": "verified",
            "trust_score": 0.8,
            "content_consistency": 0.7,
            "sentiment_subjectivity": 0.3,
            "ml_model_prediction": 0.9
        }))
        .unwrap();

        assert_eq!(article.id, Some(ArticleId::Number(42)));
        assert_eq!(article.author.as_deref(), Some("A"));
        assert_eq!(article.content, "");
        assert_eq!(article.status, ArticleStatus::Verified);
        assert_eq!(article.source_credibility, None);
        assert_eq!(
            article.published_on(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }

    #[test]
    fn test_string_ids_and_missing_status() {
        let article: Article = serde_json::from_value(json!({
            "id": "abc-1",
            "url": "https://example.com/b"
        }))
        .unwrap();
        assert_eq!(article.id, Some(ArticleId::Text("abc-1".to_string())));
        assert_eq!(article.status, ArticleStatus::Unverified);
        assert_eq!(article.id.unwrap().to_string(), "abc-1");
    }

    #[test]
    fn test_publish_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        for raw in [
            "2024-03-05",
            "2024-03-05T10:20:30",
            "2024-03-05T10:20:30+02:00",
            "Tue, 05 Mar 2024 10:20:30 GMT",
        ] {
            assert_eq!(parse_publish_date(raw), expected, "format: {}", raw);
        }
        assert_eq!(parse_publish_date("yesterday"), None);
    }
}
