//! Create player use case.

use std::sync::Arc;

use tomebound_domain::{GameData, PlayerId, PlayerName, PlayerProgression, UtcOffset};

use crate::infrastructure::clock::PortRandom;
use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort};
use crate::use_cases::log_quest_events;

use super::error::PlayerError;

/// Create a player with the starting grant and fill their quest slots.
pub struct CreatePlayer {
    players: Arc<dyn PlayerRepo>,
    data: Arc<GameData>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl CreatePlayer {
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

    /// # Arguments
    /// * `name` - Display name, trimmed
    /// * `utc_offset_minutes` - Player timezone; quest periods roll over at
    ///   local midnight
    pub async fn execute(
        &self,
        name: &str,
        utc_offset_minutes: i32,
    ) -> Result<PlayerProgression, PlayerError> {
        let name = PlayerName::new(name)?;
        let offset = UtcOffset::from_minutes(utc_offset_minutes)?;
        let now = self.clock.now();

        let player_id = PlayerId::from_uuid(self.random.gen_uuid());
        let mut player = PlayerProgression::new(name, offset, &self.data, now).with_id(player_id);
        let events = player.setup_quests(&self.data, now, &mut PortRandom(self.random.as_ref()));
        log_quest_events(player_id, &events);

        self.players.save(&player).await?;
        tracing::info!(
            player_id = %player_id,
            name = %player.name().as_str(),
            utc_offset_minutes,
            "Player created"
        );
        Ok(player)
    }
}
