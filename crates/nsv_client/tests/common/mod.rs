//! Local stand-in for the article backend, shared by the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use nsv_client::{ClientConfig, HttpBackend};
use nsv_core::ScrapeRequest;
use serde_json::json;

#[derive(Default)]
pub struct FakeBackend {
    pub scrape_bodies: Mutex<Vec<ScrapeRequest>>,
    pub lookups: Mutex<Vec<String>>,
}

pub const KNOWN_URL: &str = "https://news.example.com/known?id=1";

pub fn known_article() -> serde_json::Value {
    json!({
        "id": 7,
        "url": KNOWN_URL,
        "title": "Known",
        "author": "Ana",
        "content": "Body",
        "publish_date": "Mon, 01 Jan 2024 00:00:00 GMT",
        "status": "verified",
        "trust_score": 0.91,
        "content_consistency": 0.8,
        "sentiment_subjectivity": 0.2,
        "ml_model_prediction": 0.95
    })
}

async fn latest(State(_state): State<Arc<FakeBackend>>) -> impl IntoResponse {
    Json(json!([
        known_article(),
        { "id": 3, "url": "https://news.example.com/other", "title": "Other", "trust_score": null }
    ]))
}

async fn find(State(state): State<Arc<FakeBackend>>, Path(url): Path<String>) -> Response {
    state.lookups.lock().unwrap().push(url.clone());
    if url == KNOWN_URL {
        Json(known_article()).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Article not found" }))).into_response()
    }
}

async fn scrape(State(state): State<Arc<FakeBackend>>, Json(body): Json<ScrapeRequest>) -> Response {
    state.scrape_bodies.lock().unwrap().push(body.clone());
    if body.url.contains("bad") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid URL" }))).into_response();
    }
    if body.url.contains("broken") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if body.url.contains("garbled") {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }
    Json(json!({
        "title": "T",
        "author": "A",
        "publish_date": "2024-01-01",
        "trust_score": 0.8,
        "url": body.url
    }))
    .into_response()
}

pub async fn spawn_backend() -> (String, Arc<FakeBackend>) {
    let state = Arc::new(FakeBackend::default());
    let app = Router::new()
        .route("/latest-articles", get(latest))
        .route("/articles/scrape", post(scrape))
        .route("/articles/:url", get(find))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

pub fn backend_for(root: &str) -> HttpBackend {
    HttpBackend::new(&ClientConfig::default().with_url(root)).unwrap()
}
