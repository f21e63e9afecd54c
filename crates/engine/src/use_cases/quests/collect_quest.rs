//! Collect quest use case.
//!
//! Pays out the current phase of a completed quest slot.

use std::sync::Arc;

use tomebound_domain::{GameData, PhaseCollected, PlayerId, Reward};

use crate::infrastructure::clock::PortRandom;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::log_rejection;

use super::error::QuestError;

/// What a successful collect paid out.
#[derive(Debug, Clone)]
pub struct QuestCollected {
    pub reward: Reward,
    pub phase: PhaseCollected,
}

pub struct CollectQuest {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl CollectQuest {
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

    /// Roll and apply the reward of the phase waiting in `slot`.
    ///
    /// # Returns
    /// * `Ok(QuestCollected)` - reward applied and player saved
    /// * `Err(QuestError::Validation)` - slot not collectable, expired or out
    ///   of range; nothing saved
    pub async fn execute(&self, player_id: PlayerId, slot: usize) -> Result<QuestCollected, QuestError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(QuestError::PlayerNotFound(player_id))?;
        let now = self.clock.now();

        let (reward, phase) = player
            .collect_quest(slot, &self.data, now, &mut PortRandom(self.random.as_ref()))
            .inspect_err(|e| log_rejection(player_id, "collect_quest", e))?;

        self.players.save(&player).await?;

        tracing::info!(
            player_id = %player_id,
            slot,
            quest_id = %phase.quest_id,
            phase = phase.phase,
            completed = phase.completed,
            reward_id = %reward.reward_id,
            cards = reward.total_cards(),
            standard = reward.standard,
            premium = reward.premium,
            overflow_currency = reward.overflow_currency,
            "Quest phase collected"
        );

        Ok(QuestCollected { reward, phase })
    }
}
