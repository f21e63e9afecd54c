//! Player operation errors.

use tomebound_domain::{DomainError, PlayerId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during player operations.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
