//! Lifetime counters quest objectives measure progress against

use serde::{Deserialize, Serialize};

use crate::game_data::ObjectiveKind;

/// Monotonic per-player counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    pub tomes_opened: u32,
    pub cards_upgraded: u32,
}

impl PlayerStats {
    /// The counter a non-battle objective reads. Battle objectives pick
    /// between `games_played` and `games_won` themselves.
    pub fn counter(&self, kind: ObjectiveKind) -> u32 {
        match kind {
            ObjectiveKind::Battle => self.games_played,
            ObjectiveKind::OpenTomes => self.tomes_opened,
            ObjectiveKind::UpgradeCards => self.cards_upgraded,
        }
    }

    pub fn record_battle(&mut self, won: bool) {
        self.games_played = self.games_played.saturating_add(1);
        if won {
            self.games_won = self.games_won.saturating_add(1);
        }
    }
}
