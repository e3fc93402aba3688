use crate::db::{RepositoryError, S3Error};
use crate::models::orders::OrderStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("The shop is closed right now")]
    ShopClosed,
    #[error("Backend error: {0}")]
    Backend(RepositoryError),
    #[error("Image upload failed: {0}")]
    Upload(#[from] S3Error),
}

impl From<RepositoryError> for ShopError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => ShopError::NotFound(what),
            other => ShopError::Backend(other),
        }
    }
}

impl ShopError {
    pub fn missing(field: &'static str) -> Self {
        ShopError::Validation { field }
    }
}
