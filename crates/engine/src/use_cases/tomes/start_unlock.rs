//! Start tome unlock use case.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tomebound_domain::{GameData, PlayerId};

use crate::infrastructure::ports::{ClockPort, PlayerRepo};
use crate::use_cases::log_rejection;

use super::error::TomeError;

/// Starts the unlock timer on a locked tome. Only one tome may unlock at a
/// time.
pub struct StartTomeUnlock {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
}

impl StartTomeUnlock {
    pub fn new(players: Arc<dyn PlayerRepo>, data: Arc<GameData>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            players,
            data,
            clock,
        }
    }

    /// Returns when the unlock completes.
    pub async fn execute(&self, player_id: PlayerId, slot: usize) -> Result<DateTime<Utc>, TomeError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(TomeError::PlayerNotFound(player_id))?;

        let completes_at = player
            .start_tome_unlock(slot, &self.data, self.clock.now())
            .inspect_err(|e| log_rejection(player_id, "start_tome_unlock", e))?;

        self.players.save(&player).await?;
        tracing::info!(
            player_id = %player_id,
            slot,
            completes_at = %completes_at,
            "Tome unlock started"
        );
        Ok(completes_at)
    }
}
