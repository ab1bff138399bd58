use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyntheticSeriesError {
    #[error("Failed to create directory '{0}' for the synthetic series")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode the synthetic series")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write synthetic series file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to read synthetic series file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode synthetic series from '{0}'")]
    Decode(PathBuf, #[source] serde_json::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
