use thiserror::Error;

/// Failures produced by the HTTP layer. Every kind collapses into a message once
/// it reaches the view state, but callers of the client can still match on it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
}

/// A failed load as stored in the view state, tagged by the loader that failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Failed to fetch users: {0}")]
    List(String),
    #[error("Failed to fetch user details: {0}")]
    Detail(String),
}

impl LoadError {
    #[must_use]
    pub fn list(cause: &ApiError) -> Self {
        Self::List(cause.to_string())
    }

    #[must_use]
    pub fn detail(cause: &ApiError) -> Self {
        Self::Detail(cause.to_string())
    }
}
