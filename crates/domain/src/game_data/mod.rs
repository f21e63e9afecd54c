//! Static game data tables.
//!
//! Loaded once at startup, validated, then shared read-only (the engine hands
//! out `Arc<GameData>`). Nothing in the progression rules ever writes here.

mod card;
mod league;
mod quest;
mod reward;
mod tome;

pub use card::{CardData, Rarity, RarityInfo, UpgradeCost};
pub use league::League;
pub use quest::{
    CardTarget, LeagueRewards, ObjectiveKind, ObjectiveSignature, QuestDefinition, QuestObjective,
    QuestPeriod, QuestPhase, QUEST_SLOT_COUNT,
};
pub use reward::{RarityBounds, RewardDefinition};
pub use tome::{AccrualSettings, TomeDefinition, MAX_UNLOCK_MULTIPLIER, MAX_UNLOCK_SECONDS};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{CardId, QuestId, RewardId, TomeDataId};
use crate::random::RandomSource;

/// Cards and currency every new player starts with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingGrant {
    #[serde(default)]
    pub standard: u64,
    #[serde(default)]
    pub premium: u64,
    /// The first card becomes the starting deck leader.
    #[serde(default)]
    pub cards: Vec<StartingCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingCard {
    pub card_id: CardId,
    pub count: u32,
}

/// Economy constants that are not rows of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomySettings {
    /// Standard currency paid per legendary copy above the holding cap.
    pub legendary_card_currency_value: u64,
    /// Tome granted for winning a battle.
    pub battle_tome: TomeDataId,
    pub free_tome: AccrualSettings,
    pub arena_tome: AccrualSettings,
    #[serde(default)]
    pub starting: StartingGrant,
}

/// All static tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub cards: Vec<CardData>,
    pub rarities: Vec<RarityInfo>,
    pub rewards: Vec<RewardDefinition>,
    pub quests: Vec<QuestDefinition>,
    pub tomes: Vec<TomeDefinition>,
    /// Ordered by `min_rank`, starting at rank 0.
    pub leagues: Vec<League>,
    /// Xp needed for level 2, 3, ... (ascending).
    #[serde(default)]
    pub account_levels: Vec<u64>,
    pub economy: EconomySettings,
}

impl GameData {
    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn card(&self, id: &CardId) -> Option<&CardData> {
        self.cards.iter().find(|c| &c.id == id)
    }

    pub fn cards_by_filter(&self, predicate: impl Fn(&CardData) -> bool) -> Vec<&CardData> {
        self.cards.iter().filter(|c| predicate(c)).collect()
    }

    pub fn rarity_data(&self, rarity: Rarity) -> Result<&RarityInfo, DomainError> {
        self.rarities
            .iter()
            .find(|r| r.rarity == rarity)
            .ok_or_else(|| DomainError::not_found("RarityInfo", rarity.display_name()))
    }

    pub fn reward_definition(&self, id: &RewardId) -> Result<&RewardDefinition, DomainError> {
        self.rewards
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| DomainError::not_found("RewardDefinition", id.as_str()))
    }

    pub fn quest_definition(&self, id: &QuestId) -> Result<&QuestDefinition, DomainError> {
        self.quests
            .iter()
            .find(|q| &q.id == id)
            .ok_or_else(|| DomainError::not_found("QuestDefinition", id.as_str()))
    }

    /// Uniform pick among the definitions matching `predicate`.
    pub fn random_quest_definition(
        &self,
        predicate: impl Fn(&QuestDefinition) -> bool,
        rng: &mut dyn RandomSource,
    ) -> Option<&QuestDefinition> {
        let candidates: Vec<&QuestDefinition> = self.quests.iter().filter(|q| predicate(q)).collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.gen_index(candidates.len())])
    }

    pub fn tome_definition(&self, id: &TomeDataId) -> Result<&TomeDefinition, DomainError> {
        self.tomes
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| DomainError::not_found("TomeDefinition", id.as_str()))
    }

    /// Index of the highest league whose `min_rank` the rank reaches.
    pub fn league_index(&self, rank: u32) -> usize {
        self.leagues
            .iter()
            .rposition(|l| l.min_rank <= rank)
            .unwrap_or(0)
    }

    pub fn league(&self, index: usize) -> Option<&League> {
        self.leagues.get(index)
    }

    /// Account level (starting at 1) reached with `xp`.
    pub fn account_level(&self, xp: u64) -> u32 {
        1 + self.account_levels.iter().filter(|&&t| t <= xp).count() as u32
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check referential integrity and value ranges. Returns the first
    /// problem found.
    pub fn validate(&self) -> Result<(), DomainError> {
        for rarity in Rarity::ALL {
            self.rarity_data(rarity)?;
        }

        for reward in &self.rewards {
            self.validate_reward(reward)?;
        }

        for quest in &self.quests {
            self.validate_quest(quest)?;
        }

        for tome in &self.tomes {
            if tome.unlock_seconds > MAX_UNLOCK_SECONDS {
                return Err(DomainError::validation(format!(
                    "tome {} unlock time exceeds {MAX_UNLOCK_SECONDS} seconds",
                    tome.id
                )));
            }
            if tome.rewards.is_empty() {
                return Err(DomainError::validation(format!(
                    "tome {} has no rewards",
                    tome.id
                )));
            }
            for reward_id in tome.rewards.iter() {
                self.reward_definition(reward_id)?;
            }
        }

        if self.leagues.first().map(|l| l.min_rank) != Some(0) {
            return Err(DomainError::validation(
                "leagues must start at min rank 0",
            ));
        }
        if self.leagues.iter().any(|l| {
            !(0.0..=MAX_UNLOCK_MULTIPLIER).contains(&l.unlock_time_multiplier)
        }) {
            return Err(DomainError::validation(format!(
                "league unlock time multipliers must be within 0..={MAX_UNLOCK_MULTIPLIER}"
            )));
        }
        if self.leagues.windows(2).any(|w| w[0].min_rank >= w[1].min_rank) {
            return Err(DomainError::validation(
                "leagues must be ordered by strictly increasing min rank",
            ));
        }
        if self.account_levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DomainError::validation(
                "account level thresholds must be strictly increasing",
            ));
        }

        let economy = &self.economy;
        self.tome_definition(&economy.battle_tome)?;
        for accrual in [&economy.free_tome, &economy.arena_tome] {
            self.tome_definition(&accrual.tome)?;
            if accrual.interval_seconds == 0 {
                return Err(DomainError::validation(format!(
                    "accrual interval for {} must be positive",
                    accrual.tome
                )));
            }
        }
        for starting in &economy.starting.cards {
            if self.card(&starting.card_id).is_none() {
                return Err(DomainError::not_found("Card", starting.card_id.as_str()));
            }
        }

        Ok(())
    }

    fn validate_reward(&self, reward: &RewardDefinition) -> Result<(), DomainError> {
        let bounds = [
            reward.card_bounds.common,
            reward.card_bounds.rare,
            reward.card_bounds.epic,
            reward.card_bounds.legendary,
            reward.standard_currency,
            reward.premium_currency,
        ];
        if bounds.iter().any(|b| !b.is_valid()) {
            return Err(DomainError::validation(format!(
                "reward {} has min > max bounds",
                reward.id
            )));
        }
        let chances = [
            reward.rare_chance,
            reward.epic_chance,
            reward.legendary_chance,
        ];
        if chances.iter().any(|c| !(0.0..=100.0).contains(c)) || chances.iter().sum::<f64>() > 100.0
        {
            return Err(DomainError::validation(format!(
                "reward {} chances must be within 0-100 and sum to at most 100",
                reward.id
            )));
        }
        Ok(())
    }

    fn validate_quest(&self, quest: &QuestDefinition) -> Result<(), DomainError> {
        if quest.phases.is_empty() {
            return Err(DomainError::validation(format!(
                "quest {} has no phases",
                quest.id
            )));
        }
        if quest.phases.iter().any(|p| p.threshold == 0)
            || quest
                .phases
                .windows(2)
                .any(|w| w[0].threshold > w[1].threshold)
        {
            return Err(DomainError::validation(format!(
                "quest {} thresholds must be positive and non-decreasing",
                quest.id
            )));
        }
        if quest.assignment_chance < 0.0 {
            return Err(DomainError::validation(format!(
                "quest {} has a negative assignment chance",
                quest.id
            )));
        }
        for phase in &quest.phases {
            if phase.rewards.is_empty() {
                return Err(DomainError::validation(format!(
                    "quest {} has a phase without rewards",
                    quest.id
                )));
            }
            for reward_id in phase.rewards.iter() {
                self.reward_definition(reward_id)?;
            }
        }
        if let QuestObjective::Battle {
            target: CardTarget::Card(card_id),
            ..
        } = &quest.objective
        {
            if self.card(card_id).is_none() {
                return Err(DomainError::not_found("Card", card_id.as_str()));
            }
        }
        Ok(())
    }
}
