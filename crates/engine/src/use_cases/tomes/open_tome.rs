//! Open tome use case.
//!
//! Rolls the reward of an unlocked tome, empties its slot, and feeds the
//! opened-tomes counter to the player's quests.

use std::sync::Arc;

use tomebound_domain::{GameData, ObjectiveKind, PlayerId, Reward};

use crate::infrastructure::clock::PortRandom;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::{log_quest_events, log_rejection};

use super::error::TomeError;

pub struct OpenTome {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl OpenTome {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        data: Arc<GameData>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            players,
            data,
            clock,
            random,
        }
    }

    pub async fn execute(&self, player_id: PlayerId, slot: usize) -> Result<Reward, TomeError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TomeError::PlayerNotFound(player_id))?;
        let now = self.clock.now();
        let mut rng = PortRandom(self.random.as_ref());

        let reward = player
            .open_tome(slot, &self.data, now, &mut rng)
            .inspect_err(|e| log_rejection(player_id, "open_tome", e))?;
        let events = player.update_quests(&[ObjectiveKind::OpenTomes], &self.data, now, &mut rng);
        log_quest_events(player_id, &events);

        self.players.save(&player).await?;
        tracing::info!(
            player_id = %player_id,
            slot,
            reward_id = %reward.reward_id,
            cards = reward.total_cards(),
            standard = reward.standard,
            premium = reward.premium,
            overflow_currency = reward.overflow_currency,
            "Tome opened"
        );
        Ok(reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPlayerRepo;
    use crate::test_fixtures::{clock_at, game_data, player_with_tome, repo_with, seeded, shared_data, test_time};
    use chrono::{DateTime, Duration, Utc};
    use tomebound_domain::{DomainError, PlayerProgression};

    fn use_case(repo: MockPlayerRepo, now: DateTime<Utc>) -> OpenTome {
        OpenTome::new(Arc::new(repo), shared_data(), Arc::new(clock_at(now)), seeded())
    }

    fn unlocking_player() -> PlayerProgression {
        let data = game_data();
        let mut player = player_with_tome();
        player.start_tome_unlock(0, &data, test_time()).unwrap();
        player
    }

    #[tokio::test]
    async fn opening_before_unlock_completes_fails() {
        let player = unlocking_player();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save().never();

        let result = use_case(repo, test_time() + Duration::seconds(1800))
            .execute(player_id, 0)
            .await;

        assert!(matches!(
            result,
            Err(TomeError::Validation(DomainError::InvalidStateTransition(_)))
        ));
    }

    #[tokio::test]
    async fn opening_after_unlock_empties_slot() {
        let player = unlocking_player();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save()
            .withf(|saved| saved.tomes().slots()[0].is_none() && saved.stats().tomes_opened == 1)
            .times(1)
            .returning(|_| Ok(()));

        let reward = use_case(repo, test_time() + Duration::seconds(3601))
            .execute(player_id, 0)
            .await
            .unwrap();

        assert_eq!(reward.reward_id.as_str(), "tome_wood");
        assert_eq!(reward.total_cards(), 4);
        assert!((10..=25).contains(&reward.standard));
    }

    #[tokio::test]
    async fn locked_tome_cannot_be_opened() {
        let player = player_with_tome();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save().never();

        let result = use_case(repo, test_time()).execute(player_id, 0).await;

        assert!(matches!(result, Err(TomeError::Validation(_))));
    }
}
