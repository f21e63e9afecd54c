//! PlayerProgression aggregate - everything a player owns and progresses
//!
//! Quest slots, tome slots, currency, cards and the counters quests read.
//! One request loads the whole aggregate, mutates it through the methods
//! below and saves it back; no method leaves it half-updated on error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::quest_book::{PhaseCollected, QuestBook, QuestContext, QuestEvent};
use super::tome_rack::{TomeAccrual, TomeRack};
use crate::common::UtcOffset;
use crate::error::DomainError;
use crate::game_data::{AccrualSettings, GameData, ObjectiveKind};
use crate::ids::{CardId, PlayerId, QuestId, TomeDataId};
use crate::random::RandomSource;
use crate::reward::{Reward, RewardRoller, RollContext};
use crate::value_objects::{
    CardCollection, Currency, Deck, PlayerName, PlayerStats, QuantityChangeResult, Wallet,
};

/// Result of a finished battle as reported by the match service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub won: bool,
    /// Rank points gained or lost. Rank never drops below 0.
    pub rank_change: i32,
    pub xp: u64,
}

/// What recording a battle changed besides the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleRecorded {
    /// Slot of the battle tome granted for a win, if there was room.
    pub granted_tome: Option<usize>,
    pub level: u32,
    pub league: usize,
}

/// A player's progression state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProgression {
    id: PlayerId,
    name: PlayerName,
    utc_offset: UtcOffset,

    xp: u64,
    rank: u32,
    wallet: Wallet,
    collection: CardCollection,
    deck: Deck,
    stats: PlayerStats,

    quests: QuestBook,
    tomes: TomeRack,
    free_tomes: TomeAccrual,
    arena_tomes: TomeAccrual,

    created_at: DateTime<Utc>,
}

impl PlayerProgression {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a player with the starting grant from `data`.
    ///
    /// Quest slots start empty; call [`PlayerProgression::setup_quests`] to
    /// fill them.
    pub fn new(name: PlayerName, utc_offset: UtcOffset, data: &GameData, now: DateTime<Utc>) -> Self {
        let grant = &data.economy.starting;

        let mut collection = CardCollection::new();
        for card in &grant.cards {
            collection.add(&card.card_id, card.count);
        }
        let mut cards = grant.cards.iter().map(|c| c.card_id.clone());
        let leader = cards.next();
        let deck = Deck::new(leader, cards.collect());

        Self {
            id: PlayerId::new(),
            name,
            utc_offset,
            xp: 0,
            rank: 0,
            wallet: Wallet::new(grant.standard, grant.premium),
            collection,
            deck,
            stats: PlayerStats::default(),
            quests: QuestBook::new(now),
            tomes: TomeRack::new(),
            free_tomes: TomeAccrual::new(now),
            arena_tomes: TomeAccrual::new(now),
            created_at: now,
        }
    }

    /// Set the player's ID (used when loading from storage).
    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    #[inline]
    pub fn utc_offset(&self) -> UtcOffset {
        self.utc_offset
    }

    #[inline]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[inline]
    pub fn rank(&self) -> u32 {
        self.rank
    }

    #[inline]
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    #[inline]
    pub fn collection(&self) -> &CardCollection {
        &self.collection
    }

    #[inline]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[inline]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    #[inline]
    pub fn quests(&self) -> &QuestBook {
        &self.quests
    }

    #[inline]
    pub fn tomes(&self) -> &TomeRack {
        &self.tomes
    }

    #[inline]
    pub fn free_tomes(&self) -> &TomeAccrual {
        &self.free_tomes
    }

    #[inline]
    pub fn arena_tomes(&self) -> &TomeAccrual {
        &self.arena_tomes
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Account level, which is also the reward tier.
    pub fn level(&self, data: &GameData) -> u32 {
        data.account_level(self.xp)
    }

    pub fn league(&self, data: &GameData) -> usize {
        data.league_index(self.rank)
    }

    // =========================================================================
    // Quests
    // =========================================================================

    /// Fill all quest slots. Called once after creation.
    pub fn setup_quests(
        &mut self,
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Vec<QuestEvent> {
        let ctx = QuestContext {
            level: data.account_level(self.xp),
            league: data.league_index(self.rank),
            offset: self.utc_offset,
            stats: self.stats,
            collection: &self.collection,
            deck: &self.deck,
        };
        self.quests.setup_defaults(data, &ctx, now, rng)
    }

    pub fn assign_random_quest(
        &mut self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<QuestId>, DomainError> {
        let ctx = QuestContext {
            level: data.account_level(self.xp),
            league: data.league_index(self.rank),
            offset: self.utc_offset,
            stats: self.stats,
            collection: &self.collection,
            deck: &self.deck,
        };
        self.quests.assign_random_quest(slot, data, &ctx, now, rng)
    }

    /// Expire and replenish quest slots, then progress objectives of `kinds`.
    pub fn update_quests(
        &mut self,
        kinds: &[ObjectiveKind],
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Vec<QuestEvent> {
        let ctx = QuestContext {
            level: data.account_level(self.xp),
            league: data.league_index(self.rank),
            offset: self.utc_offset,
            stats: self.stats,
            collection: &self.collection,
            deck: &self.deck,
        };
        self.quests.update(kinds, data, &ctx, now, rng)
    }

    pub fn is_quest_collectable(&self, slot: usize, data: &GameData, now: DateTime<Utc>) -> bool {
        self.quests.is_collectable(slot, data, now)
    }

    /// Collect the current phase of the quest in `slot` and apply its reward.
    pub fn collect_quest(
        &mut self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<(Reward, PhaseCollected), DomainError> {
        let reward_id = self.quests.claimable_reward(slot, data, now)?;
        let definition = data.reward_definition(&reward_id)?;
        let reward = RewardRoller::new(data).roll(definition, self.roll_context(data), rng);

        let collected = self.quests.collect(slot, data, self.utc_offset, now)?;
        self.add_rewards(&reward);
        Ok((reward, collected))
    }

    // =========================================================================
    // Tomes
    // =========================================================================

    /// Place a locked tome, snapshotting the current league.
    pub fn grant_tome(
        &mut self,
        tome_id: TomeDataId,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        data.tome_definition(&tome_id)?;
        let league = self.league(data);
        self.tomes.grant(tome_id, league, now)
    }

    pub fn start_tome_unlock(
        &mut self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, DomainError> {
        self.tomes.start_unlocking(slot, data, now)
    }

    pub fn tome_rush_cost(
        &self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        self.tomes.rush_cost(slot, data, now)
    }

    /// Unlock a tome immediately for premium currency. Returns the price.
    pub fn rush_tome(
        &mut self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        self.tomes.rush(slot, data, &mut self.wallet, now)
    }

    /// Open an unlocked tome, apply its reward and empty the slot.
    pub fn open_tome(
        &mut self,
        slot: usize,
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<Reward, DomainError> {
        let tome = self.tomes.openable(slot, now)?;
        let (tome_id, league) = (tome.tome_id().clone(), tome.league());
        let reward = self.roll_tome(&tome_id, league, data, rng)?;

        self.tomes.take(slot, now)?;
        self.apply_opened(&reward);
        Ok(reward)
    }

    pub fn claim_free_tome(
        &mut self,
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<Reward, DomainError> {
        let settings = &data.economy.free_tome;
        let reward = self.roll_accrued(&self.free_tomes, settings, "free", data, now, rng)?;
        self.free_tomes.claim(settings, now, "free")?;
        self.apply_opened(&reward);
        Ok(reward)
    }

    pub fn claim_arena_tome(
        &mut self,
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<Reward, DomainError> {
        let settings = &data.economy.arena_tome;
        let reward = self.roll_accrued(&self.arena_tomes, settings, "arena", data, now, rng)?;
        self.arena_tomes.claim(settings, now, "arena")?;
        self.apply_opened(&reward);
        Ok(reward)
    }

    fn roll_accrued(
        &self,
        accrual: &TomeAccrual,
        settings: &AccrualSettings,
        kind: &'static str,
        data: &GameData,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> Result<Reward, DomainError> {
        if accrual.available(settings, now) == 0 {
            return Err(DomainError::NoTomeAvailable(kind));
        }
        self.roll_tome(&settings.tome, self.league(data), data, rng)
    }

    fn roll_tome(
        &self,
        tome_id: &TomeDataId,
        league: usize,
        data: &GameData,
        rng: &mut dyn RandomSource,
    ) -> Result<Reward, DomainError> {
        let tome = data.tome_definition(tome_id)?;
        let reward_id = tome
            .rewards
            .for_league(league)
            .ok_or_else(|| DomainError::not_found("RewardDefinition", tome_id.as_str()))?;
        let definition = data.reward_definition(reward_id)?;
        Ok(RewardRoller::new(data).roll(definition, self.roll_context(data), rng))
    }

    fn roll_context(&self, data: &GameData) -> RollContext<'_> {
        RollContext {
            tier: self.level(data),
            collection: &self.collection,
        }
    }

    fn apply_opened(&mut self, reward: &Reward) {
        self.add_rewards(reward);
        self.stats.tomes_opened = self.stats.tomes_opened.saturating_add(1);
    }

    // =========================================================================
    // Rewards, cards and battles
    // =========================================================================

    /// Credit currencies (overflow included) and the non-overflowing copies.
    pub fn add_rewards(&mut self, reward: &Reward) {
        self.wallet.credit(Currency::Premium, reward.premium);
        self.wallet.credit(
            Currency::Standard,
            reward.standard.saturating_add(reward.overflow_currency),
        );
        for card in &reward.cards {
            let granted = card.granted();
            if granted > 0 {
                self.collection.add(&card.card_id, granted);
            }
        }
    }

    /// Replace the deck. Every card, leader included, must be owned.
    pub fn set_deck(&mut self, deck: Deck) -> Result<(), DomainError> {
        if let Some(missing) = deck.all_cards().find(|id| !self.collection.owns(id)) {
            return Err(DomainError::CardNotOwned(missing.to_string()));
        }
        self.deck = deck;
        Ok(())
    }

    /// Spend copies and standard currency to raise a card one level.
    /// Returns the new level.
    pub fn upgrade_card(&mut self, card_id: &CardId, data: &GameData) -> Result<u32, DomainError> {
        let card = data
            .card(card_id)
            .ok_or_else(|| DomainError::not_found("Card", card_id.as_str()))?;
        let rarity = data.rarity_data(card.rarity)?;
        let owned = self
            .collection
            .get(card_id)
            .ok_or_else(|| DomainError::CardNotOwned(card_id.to_string()))?;
        let cost = *rarity
            .upgrade_cost(owned.level)
            .ok_or_else(|| DomainError::MaxLevelReached {
                card_id: card_id.to_string(),
                max_level: rarity.max_level,
            })?;
        if owned.count < cost.cards {
            return Err(DomainError::CardNotOwned(format!(
                "{card_id}: upgrade needs {} copies, {} owned",
                cost.cards, owned.count
            )));
        }
        self.wallet
            .ensure_affordable(Currency::Standard, cost.currency)?;

        if let QuantityChangeResult::Insufficient { available } =
            self.collection.remove(card_id, cost.cards)
        {
            return Err(DomainError::invariant(format!(
                "{card_id}: {available} copies after passing the copy check"
            )));
        }
        self.wallet.debit(Currency::Standard, cost.currency)?;
        let level = match self.collection.get_mut(card_id) {
            Some(owned) => {
                owned.level += 1;
                owned.level
            }
            None => return Err(DomainError::invariant(format!("{card_id} vanished mid-upgrade"))),
        };
        self.stats.cards_upgraded = self.stats.cards_upgraded.saturating_add(1);
        Ok(level)
    }

    /// Apply a battle result: counters, rank, xp, and a battle tome for a
    /// win when a slot is free.
    pub fn record_battle(
        &mut self,
        outcome: BattleOutcome,
        data: &GameData,
        now: DateTime<Utc>,
    ) -> Result<BattleRecorded, DomainError> {
        let battle_tome = &data.economy.battle_tome;
        data.tome_definition(battle_tome)?;

        self.stats.record_battle(outcome.won);
        self.rank = self.rank.saturating_add_signed(outcome.rank_change);
        self.xp = self.xp.saturating_add(outcome.xp);

        let league = self.league(data);
        let granted_tome = if outcome.won && self.tomes.first_empty().is_some() {
            Some(self.tomes.grant(battle_tome.clone(), league, now)?)
        } else {
            None
        };

        Ok(BattleRecorded {
            granted_tome,
            level: self.level(data),
            league,
        })
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Intermediate format for serialization that matches the stored document
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerProgressionWireFormat {
    id: PlayerId,
    name: PlayerName,
    #[serde(default)]
    utc_offset: UtcOffset,
    #[serde(default)]
    xp: u64,
    #[serde(default)]
    rank: u32,
    #[serde(default)]
    wallet: Wallet,
    #[serde(default)]
    collection: CardCollection,
    #[serde(default)]
    deck: Deck,
    #[serde(default)]
    stats: PlayerStats,
    quests: QuestBook,
    #[serde(default)]
    tomes: TomeRack,
    free_tomes: TomeAccrual,
    arena_tomes: TomeAccrual,
    created_at: DateTime<Utc>,
}

impl Serialize for PlayerProgression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = PlayerProgressionWireFormat {
            id: self.id,
            name: self.name.clone(),
            utc_offset: self.utc_offset,
            xp: self.xp,
            rank: self.rank,
            wallet: self.wallet,
            collection: self.collection.clone(),
            deck: self.deck.clone(),
            stats: self.stats,
            quests: self.quests.clone(),
            tomes: self.tomes.clone(),
            free_tomes: self.free_tomes,
            arena_tomes: self.arena_tomes,
            created_at: self.created_at,
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PlayerProgression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = PlayerProgressionWireFormat::deserialize(deserializer)?;

        Ok(PlayerProgression {
            id: wire.id,
            name: wire.name,
            utc_offset: wire.utc_offset,
            xp: wire.xp,
            rank: wire.rank,
            wallet: wire.wallet,
            collection: wire.collection,
            deck: wire.deck,
            stats: wire.stats,
            quests: wire.quests,
            tomes: wire.tomes,
            free_tomes: wire.free_tomes,
            arena_tomes: wire.arena_tomes,
            created_at: wire.created_at,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
