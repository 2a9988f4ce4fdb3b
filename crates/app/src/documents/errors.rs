//! Document store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("storage error: {0}")]
    Sql(#[from] sqlx::Error),
}
