use crate::config::ConfigError;
use crate::semantic::EmbeddingError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Missing API key. Please set JSEARCH_API_KEY.")]
    MissingApiKey,

    #[error("Please enter both resume text and job titles.")]
    EmptyInput,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("embedding model error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("reqwest error: {0:?}")]
    Reqwest(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),

    #[error("unexpected error: {0:?}")]
    Other(#[from] anyhow::Error),
}
