//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns domain events from mutations
//! - Validates before writing, so a failed call leaves it unchanged

pub mod player_progression;
pub mod quest_book;
pub mod tome_rack;

pub use player_progression::{BattleOutcome, BattleRecorded, PlayerProgression};
pub use quest_book::{
    ObjectiveState, PhaseCollected, QuestBook, QuestContext, QuestEvent, QuestInstance,
};
pub use tome_rack::{unlock_duration, Tome, TomeAccrual, TomeRack, TomeState, TOME_SLOT_COUNT};
