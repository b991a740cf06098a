use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),
}

pub type EmitResult<T> = Result<T, EmitError>;
