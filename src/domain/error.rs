use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Weather provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("Token error: {0}")]
    Token(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

/// Failures of the outbound weather lookup. `CityNotFound` is a business
/// outcome; the other variants are transient and may be retried by the
/// resilience decorator around the client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected weather provider payload: {0}")]
    InvalidPayload(String),
}

impl ProviderError {
    /// Transient failures are eligible for retry; a city that does not
    /// exist is not going to appear on the next attempt.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ProviderError::CityNotFound(_))
    }
}
