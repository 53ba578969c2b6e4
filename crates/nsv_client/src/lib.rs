use std::sync::Arc;

use nsv_core::{ArticleApi, Error, Result};

pub mod backends;
pub mod config;

pub use backends::*;
pub use config::ClientConfig;

/// Build the backend named on the command line.
pub fn create_backend(kind: &str, config: &ClientConfig) -> Result<Arc<dyn ArticleApi>> {
    match kind.to_lowercase().as_str() {
        "http" => Ok(Arc::new(HttpBackend::new(config)?)),
        "memory" => Ok(Arc::new(MemoryBackend::new())),
        other => Err(Error::Config(format!(
            "Unknown backend '{}'. Available backends: http, memory",
            other
        ))),
    }
}
