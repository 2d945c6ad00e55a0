use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum SquadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead { path: String, source: std::io::Error },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid config value: {0}")]
    InvalidConfig(String),

    #[error("Unknown stat field: {0}")]
    UnknownStatField(String),

    #[error("Unknown position: {0}")]
    UnknownPosition(String),

    #[error("Unknown roster order: {0}")]
    UnknownRosterOrder(String),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),
}

pub type Result<T> = std::result::Result<T, SquadError>;
