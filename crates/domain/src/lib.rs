//! Progression rules for the Tomebound card game: quest slots, tome
//! unlocking and reward rolling.
//!
//! Everything here is synchronous and I/O-free. Time arrives as a `now`
//! argument and randomness through [`RandomSource`].

pub mod aggregates;
pub mod common;
pub mod error;
pub mod game_data;
pub mod ids;
pub mod random;
pub mod reward;
pub mod value_objects;

pub use aggregates::{
    BattleOutcome, BattleRecorded, ObjectiveState, PhaseCollected, PlayerProgression, QuestBook,
    QuestEvent, QuestInstance, Tome, TomeAccrual, TomeRack, TomeState, TOME_SLOT_COUNT,
};
pub use common::{next_weekday, timezone_midnight, UtcOffset};
pub use error::DomainError;
pub use game_data::{
    CardData, GameData, League, ObjectiveKind, QuestDefinition, QuestPeriod, Rarity,
    RewardDefinition, TomeDefinition, QUEST_SLOT_COUNT,
};
pub use ids::{CardId, PlayerId, QuestId, RewardId, TomeDataId};
pub use random::{shuffle, RandomSource};
pub use reward::{Reward, RewardRoller, RewardedCard, RollContext};
pub use value_objects::{
    Bounds, CardCollection, Currency, Deck, OwnedCard, PlayerName, PlayerStats, Wallet,
};
