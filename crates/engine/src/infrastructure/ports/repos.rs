//! Repository port traits for player storage.

use async_trait::async_trait;
use tomebound_domain::{PlayerId, PlayerProgression};

use super::error::RepoError;

// =============================================================================
// Player Storage
// =============================================================================

/// Whole-document storage of player aggregates.
///
/// `get` and `save` are atomic on one document. Concurrent saves of the same
/// player are not reconciled: the last writer wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<PlayerProgression>, RepoError>;
    async fn save(&self, player: &PlayerProgression) -> Result<(), RepoError>;
    /// Every stored player, in a stable order.
    async fn list_ids(&self) -> Result<Vec<PlayerId>, RepoError>;
}
