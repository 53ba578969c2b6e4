use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a structured error.
    #[error("Error: {0}")]
    Remote(String),

    /// The request never produced a usable response.
    #[error("An error occurred: {0}")]
    Transport(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn url_required() -> Self {
        Error::Validation("URL is required".to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
