pub mod api;
pub mod error;
pub mod types;

pub use api::ArticleApi;
pub use error::Error;
pub use types::{Article, ArticleId, ArticleStatus, ErrorBody, ScrapeRequest, TrustVerdict, TRUST_THRESHOLD};

pub type Result<T> = std::result::Result<T, Error>;
