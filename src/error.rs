/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AppError {
    /// Whether this error came out of a remote fetch rather than caller misuse.
    ///
    /// Fetch failures are recorded into the result cache; everything else is
    /// returned to the caller.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AppError::HttpClient(_) | AppError::Network(_) | AppError::MalformedResponse(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
