//! Upgrade card use case.

use std::sync::Arc;

use tomebound_domain::{CardId, GameData, ObjectiveKind, PlayerId};

use crate::infrastructure::clock::PortRandom;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::{log_quest_events, log_rejection};

use super::error::PlayerError;

/// Spend copies and standard currency to raise a card one level, then feed
/// the upgrade counter to the player's quests.
pub struct UpgradeCard {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl UpgradeCard {
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

    /// Returns the card's new level.
    pub async fn execute(&self, player_id: PlayerId, card_id: &CardId) -> Result<u32, PlayerError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(PlayerError::PlayerNotFound(player_id))?;

        let level = player
            .upgrade_card(card_id, &self.data)
            .inspect_err(|e| log_rejection(player_id, "upgrade_card", e))?;
        let events = player.update_quests(
            &[ObjectiveKind::UpgradeCards],
            &self.data,
            self.clock.now(),
            &mut PortRandom(self.random.as_ref()),
        );
        log_quest_events(player_id, &events);

        self.players.save(&player).await?;
        tracing::info!(player_id = %player_id, card_id = %card_id, level, "Card upgraded");
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPlayerRepo;
    use crate::test_fixtures::{clock_at, repo_with, seeded, shared_data, test_player, test_time};
    use tomebound_domain::{Currency, DomainError};

    fn use_case(repo: MockPlayerRepo) -> UpgradeCard {
        UpgradeCard::new(Arc::new(repo), shared_data(), Arc::new(clock_at(test_time())), seeded())
    }

    #[tokio::test]
    async fn upgrade_spends_copies_and_feeds_weekly_quest() {
        let player = test_player();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save()
            .withf(|saved| {
                let squire = saved.collection().get(&CardId::new("squire"));
                squire.is_some_and(|c| c.level == 2 && c.count == 2)
                    && saved.wallet().balance(Currency::Standard) == 195
                    && saved.stats().cards_upgraded == 1
                    && saved.quests().slots()[2].progress() == 1
            })
            .times(1)
            .returning(|_| Ok(()));

        let level = use_case(repo)
            .execute(player_id, &CardId::new("squire"))
            .await
            .unwrap();

        assert_eq!(level, 2);
    }

    #[tokio::test]
    async fn too_few_copies_is_rejected() {
        let player = test_player();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save().never();

        let result = use_case(repo)
            .execute(player_id, &CardId::new("goblin"))
            .await;

        assert!(matches!(
            result,
            Err(PlayerError::Validation(DomainError::CardNotOwned(_)))
        ));
    }

    #[tokio::test]
    async fn unknown_card_is_not_found() {
        let player = test_player();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save().never();

        let result = use_case(repo)
            .execute(player_id, &CardId::new("unicorn"))
            .await;

        assert!(matches!(
            result,
            Err(PlayerError::Validation(DomainError::NotFound { .. }))
        ));
    }
}
