use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StringsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Input not found: {0:?}")]
    InputNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, StringsError>;
