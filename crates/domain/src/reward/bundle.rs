//! A concrete, rolled reward

use serde::{Deserialize, Serialize};

use crate::game_data::Rarity;
use crate::ids::{CardId, RewardId};

/// One card line of a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardedCard {
    pub card_id: CardId,
    pub rarity: Rarity,
    /// Copies rolled, including any overflow.
    pub count: u32,
    /// Copies above the holding cap, paid out as currency instead.
    pub overflow: u32,
}

impl RewardedCard {
    pub fn new(card_id: CardId, rarity: Rarity, count: u32) -> Self {
        Self {
            card_id,
            rarity,
            count,
            overflow: 0,
        }
    }

    /// Copies that actually land in the collection.
    pub fn granted(&self) -> u32 {
        self.count.saturating_sub(self.overflow)
    }
}

/// Cards and currency granted by a tome or quest phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Reward definition this was rolled from.
    pub reward_id: RewardId,
    pub cards: Vec<RewardedCard>,
    pub premium: u64,
    pub standard: u64,
    /// Standard currency paid for overflowing legendary copies.
    pub overflow_currency: u64,
}

impl Reward {
    pub fn empty(reward_id: RewardId) -> Self {
        Self {
            reward_id,
            cards: Vec::new(),
            premium: 0,
            standard: 0,
            overflow_currency: 0,
        }
    }

    /// Sum of rolled copies across all lines.
    pub fn total_cards(&self) -> u32 {
        self.cards.iter().map(|c| c.count).sum()
    }

    pub fn cards_of(&self, rarity: Rarity) -> u32 {
        self.cards
            .iter()
            .filter(|c| c.rarity == rarity)
            .map(|c| c.count)
            .sum()
    }

    /// Overflow counts, parallel to `cards`.
    pub fn overflow_amounts(&self) -> impl Iterator<Item = u32> + '_ {
        self.cards.iter().map(|c| c.overflow)
    }

    pub fn total_overflow(&self) -> u32 {
        self.overflow_amounts().sum()
    }
}
