use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupted entry '{key}': {source}")]
    Json { key: String, source: serde_json::Error },

    #[error("Invalid record: {0}")]
    Validation(String),

    #[error("Invalid store key: {key}")]
    InvalidKey { key: String },
}

impl StoreError {
    /// Only a bad key or a corrupted entry needs a reset to recover.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::Validation(_) => true,
            StoreError::Json { .. } => false,
            StoreError::InvalidKey { .. } => false,
        }
    }
}
