//! Quest operation errors.

use tomebound_domain::{DomainError, PlayerId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during quest operations.
#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
