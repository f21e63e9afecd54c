//! Update quests use case.
//!
//! Expires stale slots, refills empty ones, and advances objectives of the
//! given kinds from the player's current counters.

use std::sync::Arc;

use tomebound_domain::{GameData, ObjectiveKind, PlayerId, QuestEvent};

use crate::infrastructure::clock::PortRandom;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::log_quest_events;

use super::error::QuestError;

pub struct UpdateQuests {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl UpdateQuests {
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

    pub async fn execute(
        &self,
        player_id: PlayerId,
        kinds: &[ObjectiveKind],
    ) -> Result<Vec<QuestEvent>, QuestError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(QuestError::PlayerNotFound(player_id))?;

        let events = player.update_quests(
            kinds,
            &self.data,
            self.clock.now(),
            &mut PortRandom(self.random.as_ref()),
        );
        log_quest_events(player_id, &events);

        self.players.save(&player).await?;
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPlayerRepo;
    use crate::test_fixtures::{clock_at, game_data, seeded, shared_data, test_player, test_time};
    use chrono::{DateTime, Duration, Utc};
    use tomebound_domain::{BattleOutcome, PlayerProgression};

    fn use_case(repo: MockPlayerRepo, now: DateTime<Utc>) -> UpdateQuests {
        UpdateQuests::new(Arc::new(repo), shared_data(), Arc::new(clock_at(now)), seeded())
    }

    fn after_wins(wins: u32) -> PlayerProgression {
        let data = game_data();
        let mut player = test_player();
        for _ in 0..wins {
            player
                .record_battle(
                    BattleOutcome {
                        won: true,
                        rank_change: 10,
                        xp: 5,
                    },
                    &data,
                    test_time(),
                )
                .unwrap();
        }
        player
    }

    fn repo_returning(player: PlayerProgression) -> MockPlayerRepo {
        let mut repo = MockPlayerRepo::new();
        let player_id = player.id();
        repo.expect_get()
            .withf(move |id| *id == player_id)
            .returning(move |_| Ok(Some(player.clone())));
        repo
    }

    #[tokio::test]
    async fn when_player_missing_returns_error() {
        let mut repo = MockPlayerRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_save().never();

        let result = use_case(repo, test_time())
            .execute(PlayerId::new(), &[ObjectiveKind::Battle])
            .await;

        assert!(matches!(result, Err(QuestError::PlayerNotFound(_))));
    }

    #[tokio::test]
    async fn battle_counters_advance_battle_quests() {
        let player = after_wins(5);
        let player_id = player.id();
        let mut repo = repo_returning(player);
        repo.expect_save()
            .withf(|saved| saved.quests().slots()[0].progress() == 5)
            .times(1)
            .returning(|_| Ok(()));

        let events = use_case(repo, test_time())
            .execute(player_id, &[ObjectiveKind::Battle])
            .await
            .unwrap();

        assert!(events.iter().any(|e| matches!(
            e,
            QuestEvent::Progressed {
                slot: 0,
                added: 5,
                progress: 5,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn other_kinds_leave_battle_quests_alone() {
        let player = after_wins(5);
        let player_id = player.id();
        let mut repo = repo_returning(player);
        repo.expect_save()
            .withf(|saved| saved.quests().slots()[0].progress() == 0)
            .returning(|_| Ok(()));

        let events = use_case(repo, test_time())
            .execute(player_id, &[ObjectiveKind::UpgradeCards])
            .await
            .unwrap();

        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn expired_daily_quest_is_replaced() {
        let player = test_player();
        let player_id = player.id();
        let expired_id = player.quests().slots()[0].quest_id().cloned().unwrap();
        let mut repo = repo_returning(player);
        repo.expect_save()
            .withf(|saved| saved.quests().slots()[0].is_active())
            .returning(|_| Ok(()));

        let events = use_case(repo, test_time() + Duration::days(1))
            .execute(player_id, &[])
            .await
            .unwrap();

        assert_eq!(
            events[0],
            QuestEvent::Expired {
                slot: 0,
                quest_id: expired_id
            }
        );
        assert!(matches!(events[1], QuestEvent::Assigned { slot: 0, .. }));
    }
}
