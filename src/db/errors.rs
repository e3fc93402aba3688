use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
    #[error("Corrupt row: {0}")]
    Corrupt(String),
    #[error("Migration failed: {0}")]
    Migration(String),
}

#[derive(Debug, Error)]
pub enum S3Error {
    #[error("S3 operation failed: {0}")]
    S3OperationFailed(String),
    #[error("S3 service error: {0}")]
    S3ServiceError(String),
    #[error("S3 configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_failures_are_not_reported_as_corrupt_rows() {
        let err = RepositoryError::Migration("relation \"dishes\" already exists".to_string());
        assert_eq!(
            err.to_string(),
            "Migration failed: relation \"dishes\" already exists"
        );
        assert!(!matches!(err, RepositoryError::Corrupt(_)));
    }
}
