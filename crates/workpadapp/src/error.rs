use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WorkpadError {
    #[error("Page not found: {0}")]
    PageNotFound(Uuid),

    #[error("Moving page {0} here would create a cycle")]
    InvalidMove(Uuid),

    #[error("A collaborator with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("The current user cannot remove themselves")]
    SelfRemoval,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, WorkpadError>;
