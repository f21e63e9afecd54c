//! Reward table rows

use serde::{Deserialize, Serialize};

use super::card::Rarity;
use crate::ids::RewardId;
use crate::value_objects::Bounds;

/// Per-rarity bounds on how many copies of a single card one reward grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityBounds {
    pub common: Bounds,
    pub rare: Bounds,
    pub epic: Bounds,
    pub legendary: Bounds,
}

impl RarityBounds {
    pub fn for_rarity(&self, rarity: Rarity) -> Bounds {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }
}

impl Default for RarityBounds {
    fn default() -> Self {
        Self {
            common: Bounds::new(1, 1),
            rare: Bounds::new(1, 1),
            epic: Bounds::new(1, 1),
            legendary: Bounds::new(1, 1),
        }
    }
}

/// A loot table: what a tome or quest phase pays out.
///
/// Legendary, epic and rare counts are guaranteed. `random_cards` are
/// common unless the weighted roll upgrades one of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDefinition {
    pub id: RewardId,
    #[serde(default)]
    pub legendary_cards: u32,
    #[serde(default)]
    pub epic_cards: u32,
    #[serde(default)]
    pub rare_cards: u32,
    #[serde(default)]
    pub random_cards: u32,
    /// Percent chances (0-100) for the weighted roll-up.
    #[serde(default)]
    pub rare_chance: f64,
    #[serde(default)]
    pub epic_chance: f64,
    #[serde(default)]
    pub legendary_chance: f64,
    #[serde(default)]
    pub card_bounds: RarityBounds,
    #[serde(default)]
    pub standard_currency: Bounds,
    #[serde(default)]
    pub premium_currency: Bounds,
}

impl RewardDefinition {
    /// Guaranteed card count for a rarity. Common has no guarantee; it is
    /// whatever the random pool leaves over.
    pub fn guaranteed(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => 0,
            Rarity::Rare => self.rare_cards,
            Rarity::Epic => self.epic_cards,
            Rarity::Legendary => self.legendary_cards,
        }
    }

    /// Nominal card total. Rolled rewards never exceed this.
    pub fn total_cards(&self) -> u32 {
        self.legendary_cards + self.epic_cards + self.rare_cards + self.random_cards
    }
}
