use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browser automation error: {0}")]
    Browser(String),

    #[error("No element matched selector {0:?} within the wait timeout")]
    ElementNotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Page fetch failed with HTTP status {0}")]
    Fetch(u16),

    #[error("Free chapter count changed during the run (expected {expected}, found {actual})")]
    Consistency { expected: usize, actual: usize },

    #[error("Failed to decode fetched image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}
