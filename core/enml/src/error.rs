use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnmlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Input not found: {0:?}")]
    InputNotFound(PathBuf),
    #[error("Unterminated block '{identifier}' opened at line {line}")]
    UnterminatedBlock { identifier: String, line: usize },
}

pub type Result<T> = std::result::Result<T, EnmlError>;
