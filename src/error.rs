use thiserror::Error;

/// Errors that can occur while talking to the recipe API
#[derive(Error, Debug)]
pub enum BrowseError {
    /// Transport failure: connection refused, DNS, non-2xx status
    #[error("Failed to fetch recipes: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Response body was not the JSON shape the API documents
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Client builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
