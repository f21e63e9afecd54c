//! Card catalog and rarity table rows

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Every rarity, lowest first.
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A row of the card catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub id: CardId,
    pub rarity: Rarity,
    /// Minimum account level at which the card can drop.
    pub tier: u32,
}

/// Cost to take a card from one level to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeCost {
    pub cards: u32,
    pub currency: u64,
}

/// A row of the rarity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityInfo {
    pub rarity: Rarity,
    pub max_level: u32,
    /// Most copies a player may hold at once.
    pub max_count: u32,
    /// `upgrade_costs[n]` takes a card from level `n + 1` to `n + 2`.
    #[serde(default)]
    pub upgrade_costs: Vec<UpgradeCost>,
}

impl RarityInfo {
    /// Cost of the next upgrade, or `None` at max level.
    pub fn upgrade_cost(&self, current_level: u32) -> Option<&UpgradeCost> {
        if current_level == 0 || current_level >= self.max_level {
            return None;
        }
        self.upgrade_costs.get((current_level - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> RarityInfo {
        RarityInfo {
            rarity: Rarity::Rare,
            max_level: 3,
            max_count: 100,
            upgrade_costs: vec![
                UpgradeCost {
                    cards: 2,
                    currency: 50,
                },
                UpgradeCost {
                    cards: 4,
                    currency: 150,
                },
            ],
        }
    }

    #[test]
    fn upgrade_cost_by_level() {
        assert_eq!(info().upgrade_cost(1).map(|c| c.cards), Some(2));
        assert_eq!(info().upgrade_cost(2).map(|c| c.currency), Some(150));
        assert!(info().upgrade_cost(3).is_none());
    }

    #[test]
    fn rarity_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Rarity::Legendary).unwrap(),
            "\"legendary\""
        );
    }
}
