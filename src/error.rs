use thiserror::Error;

/// Errors surfaced by the listing core.
#[derive(Debug, Error)]
pub enum ListingError {
    /// A required field is missing or malformed. Raised before any store call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The store answered but reported a failure.
    #[error("{0}")]
    Store(String),

    /// The call to the store did not complete.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ListingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;
