//! Record battle use case.
//!
//! Applies a finished battle reported by the match service: counters, rank,
//! xp, a battle tome for a win, then battle quest progress.

use std::sync::Arc;

use tomebound_domain::{BattleOutcome, BattleRecorded, GameData, ObjectiveKind, PlayerId};

use crate::infrastructure::clock::PortRandom;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::{log_quest_events, log_rejection};

use super::error::PlayerError;

pub struct RecordBattle {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl RecordBattle {
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
        outcome: BattleOutcome,
    ) -> Result<BattleRecorded, PlayerError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(PlayerError::PlayerNotFound(player_id))?;
        let now = self.clock.now();

        let recorded = player
            .record_battle(outcome, &self.data, now)
            .inspect_err(|e| log_rejection(player_id, "record_battle", e))?;
        let events = player.update_quests(
            &[ObjectiveKind::Battle],
            &self.data,
            now,
            &mut PortRandom(self.random.as_ref()),
        );
        log_quest_events(player_id, &events);

        self.players.save(&player).await?;
        tracing::info!(
            player_id = %player_id,
            won = outcome.won,
            rank = player.rank(),
            level = recorded.level,
            league = recorded.league,
            granted_tome = ?recorded.granted_tome,
            "Battle recorded"
        );
        Ok(recorded)
    }
}
