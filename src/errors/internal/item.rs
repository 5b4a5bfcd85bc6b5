use thiserror::Error;

/// Domain errors for item operations
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Item validation failed: {0}")]
    ValidationFailed(String),
}
