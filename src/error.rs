use crate::api::error::ApiError;
use crate::synthetic::error::SyntheticSeriesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfoClimatError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The synthetic series artifact could not be materialized; the client is unusable.
    #[error("Startup failed while preparing the synthetic series")]
    StartupFailed(#[from] SyntheticSeriesError),

    #[error("Failed to load configuration")]
    Config(#[from] config::ConfigError),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
