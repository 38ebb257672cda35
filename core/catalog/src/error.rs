use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Online feed has no item records")]
    EmptyFeed,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
