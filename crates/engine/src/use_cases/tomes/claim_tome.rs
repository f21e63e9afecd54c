//! Claim accrued tome use case.
//!
//! Free and arena tomes accrue on timers. Claiming one opens it on the spot.

use std::sync::Arc;

use tomebound_domain::{GameData, ObjectiveKind, PlayerId, Reward};

use crate::infrastructure::clock::PortRandom;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::{log_quest_events, log_rejection};

use super::error::TomeError;

/// Which accrual timer to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccruedTome {
    Free,
    Arena,
}

pub struct ClaimTome {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl ClaimTome {
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

    pub async fn execute(&self, player_id: PlayerId, source: AccruedTome) -> Result<Reward, TomeError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TomeError::PlayerNotFound(player_id))?;
        let now = self.clock.now();
        let mut rng = PortRandom(self.random.as_ref());

        let (claimed, operation) = match source {
            AccruedTome::Free => (player.claim_free_tome(&self.data, now, &mut rng), "claim_free_tome"),
            AccruedTome::Arena => (player.claim_arena_tome(&self.data, now, &mut rng), "claim_arena_tome"),
        };
        let reward = claimed.inspect_err(|e| log_rejection(player_id, operation, e))?;
        let events = player.update_quests(&[ObjectiveKind::OpenTomes], &self.data, now, &mut rng);
        log_quest_events(player_id, &events);

        self.players.save(&player).await?;
        tracing::info!(
            player_id = %player_id,
            source = ?source,
            reward_id = %reward.reward_id,
            cards = reward.total_cards(),
            standard = reward.standard,
            premium = reward.premium,
            "Accrued tome claimed"
        );
        Ok(reward)
    }
}
