//! Rush tome use case.
//!
//! Finishes a locked or unlocking tome immediately for premium currency.

use std::sync::Arc;

use tomebound_domain::{GameData, PlayerId};

use crate::infrastructure::ports::{ClockPort, PlayerRepo};
use crate::use_cases::log_rejection;

use super::error::TomeError;

pub struct RushTome {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
}

impl RushTome {
    pub fn new(players: Arc<dyn PlayerRepo>, data: Arc<GameData>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            players,
            data,
            clock,
        }
    }

    /// Current premium price to rush `slot`. Read-only.
    pub async fn quote(&self, player_id: PlayerId, slot: usize) -> Result<u64, TomeError> {
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TomeError::PlayerNotFound(player_id))?;

        Ok(player.tome_rush_cost(slot, &self.data, self.clock.now())?)
    }

    /// Pay and unlock. Returns the price paid.
    pub async fn execute(&self, player_id: PlayerId, slot: usize) -> Result<u64, TomeError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TomeError::PlayerNotFound(player_id))?;

        let cost = player
            .rush_tome(slot, &self.data, self.clock.now())
            .inspect_err(|e| log_rejection(player_id, "rush_tome", e))?;

        self.players.save(&player).await?;
        tracing::info!(player_id = %player_id, slot, cost, "Tome rushed");
        Ok(cost)
    }
}
