use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeftRightError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type LrResult<T> = Result<T, LeftRightError>;
