use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ENML error: {0}")]
    Enml(#[from] enml::EnmlError),
    #[error("None of the enemy directories exist: {0:?}")]
    NoEnemyDirectories(Vec<PathBuf>),
}

pub type Result<T> = std::result::Result<T, CodegenError>;
