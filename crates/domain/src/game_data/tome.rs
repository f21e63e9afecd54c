//! Tome (loot container) rows and accrual settings

use serde::{Deserialize, Serialize};

use super::quest::LeagueRewards;
use crate::ids::TomeDataId;

/// Longest base unlock time game data may declare (30 days).
pub const MAX_UNLOCK_SECONDS: u64 = 30 * 24 * 3600;

/// Largest league unlock time multiplier game data may declare.
pub const MAX_UNLOCK_MULTIPLIER: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomeDefinition {
    pub id: TomeDataId,
    /// Base unlock time before the league multiplier.
    pub unlock_seconds: u64,
    /// Premium cost to rush a tome that has not started unlocking. A tome
    /// mid-unlock costs this scaled by the remaining fraction.
    pub rush_cost: u64,
    pub rewards: LeagueRewards,
}

/// A timer-driven tome counter (free and arena tomes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualSettings {
    pub tome: TomeDataId,
    /// One tome accrues per interval.
    pub interval_seconds: u64,
    #[serde(default = "default_accrual_cap")]
    pub cap: u32,
}

fn default_accrual_cap() -> u32 {
    3
}
