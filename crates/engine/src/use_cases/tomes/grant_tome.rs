//! Grant tome use case.

use std::sync::Arc;

use tomebound_domain::{GameData, PlayerId, TomeDataId};

use crate::infrastructure::ports::{ClockPort, PlayerRepo};
use crate::use_cases::log_rejection;

use super::error::TomeError;

/// Places a locked tome in the player's first empty slot, snapshotting the
/// current league.
pub struct GrantTome {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
}

impl GrantTome {
    pub fn new(players: Arc<dyn PlayerRepo>, data: Arc<GameData>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            players,
            data,
            clock,
        }
    }

    /// Returns the slot the tome landed in.
    pub async fn execute(&self, player_id: PlayerId, tome_id: TomeDataId) -> Result<usize, TomeError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TomeError::PlayerNotFound(player_id))?;

        let slot = player
            .grant_tome(tome_id.clone(), &self.data, self.clock.now())
            .inspect_err(|e| log_rejection(player_id, "grant_tome", e))?;

        self.players.save(&player).await?;
        tracing::info!(player_id = %player_id, slot, tome_id = %tome_id, "Tome granted");
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPlayerRepo;
    use crate::test_fixtures::{clock_at, game_data, player_with_tome, repo_with, shared_data, test_time};
    use tomebound_domain::{DomainError, TomeState};

    fn use_case(repo: MockPlayerRepo) -> GrantTome {
        GrantTome::new(Arc::new(repo), shared_data(), Arc::new(clock_at(test_time())))
    }

    #[tokio::test]
    async fn grants_into_first_empty_slot() {
        let player = player_with_tome();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save()
            .withf(|saved| {
                saved.tomes().slots()[1]
                    .as_ref()
                    .is_some_and(|t| t.tome_id().as_str() == "gold" && t.stored_state() == TomeState::Locked)
            })
            .times(1)
            .returning(|_| Ok(()));

        let slot = use_case(repo)
            .execute(player_id, TomeDataId::new("gold"))
            .await
            .unwrap();

        assert_eq!(slot, 1);
    }

    #[tokio::test]
    async fn full_rack_is_rejected_without_saving() {
        let data = game_data();
        let mut player = player_with_tome();
        for _ in 0..3 {
            player
                .grant_tome(TomeDataId::new("wood"), &data, test_time())
                .unwrap();
        }
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save().never();

        let result = use_case(repo)
            .execute(player_id, TomeDataId::new("wood"))
            .await;

        assert!(matches!(
            result,
            Err(TomeError::Validation(DomainError::NoEmptySlot))
        ));
    }

    #[tokio::test]
    async fn unknown_tome_is_not_found() {
        let player = player_with_tome();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save().never();

        let result = use_case(repo)
            .execute(player_id, TomeDataId::new("obsidian"))
            .await;

        assert!(matches!(
            result,
            Err(TomeError::Validation(DomainError::NotFound { .. }))
        ));
    }
}
