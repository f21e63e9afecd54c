//! Leagues and account levels

use serde::{Deserialize, Serialize};

/// Rank-derived tier. Leagues are ordered by `min_rank`; the position in
/// that order is the league index stored on quests and tomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub name: String,
    pub min_rank: u32,
    /// Scales tome unlock durations for tomes acquired in this league.
    #[serde(default = "default_multiplier")]
    pub unlock_time_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}
