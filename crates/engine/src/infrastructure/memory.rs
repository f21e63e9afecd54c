//! In-memory document store for player aggregates.
//!
//! Each player is kept as one serialized JSON document, so a save replaces
//! the whole aggregate and a load always returns a private copy.

use async_trait::async_trait;
use dashmap::DashMap;
use tomebound_domain::{PlayerId, PlayerProgression};

use crate::infrastructure::ports::{PlayerRepo, RepoError};

#[derive(Default)]
pub struct InMemoryPlayerRepo {
    documents: DashMap<PlayerId, String>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl PlayerRepo for InMemoryPlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<PlayerProgression>, RepoError> {
        let Some(document) = self.documents.get(&id) else {
            return Ok(None);
        };
        serde_json::from_str(document.value())
            .map(Some)
            .map_err(RepoError::serialization)
    }

    async fn save(&self, player: &PlayerProgression) -> Result<(), RepoError> {
        let document = serde_json::to_string(player).map_err(RepoError::serialization)?;
        self.documents.insert(player.id(), document);
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<PlayerId>, RepoError> {
        let mut ids: Vec<PlayerId> = self.documents.iter().map(|entry| *entry.key()).collect();
        ids.sort_by_key(|id| id.to_uuid());
        Ok(ids)
    }
}
