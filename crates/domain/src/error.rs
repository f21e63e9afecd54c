//! Unified error types for the domain layer
//!
//! Every "not eligible" outcome of a progression operation is a named variant
//! here. Operations that return one of these leave the aggregate untouched.

use thiserror::Error;

use crate::value_objects::Currency;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Slot index outside of the fixed slot array
    #[error("Slot {index} out of range (0..{len})")]
    SlotOutOfRange { index: usize, len: usize },

    /// Quest slot is inactive or its current phase threshold is unmet
    #[error("Quest in slot {slot} is not collectable")]
    NotCollectable { slot: usize },

    /// Quest slot passed its expiration before being collected
    #[error("Quest in slot {slot} has expired")]
    QuestExpired { slot: usize },

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Another tome is already unlocking
    #[error("Tome in slot {slot} is already unlocking")]
    AlreadyUnlocking { slot: usize },

    /// Not enough currency for the requested action
    #[error("Insufficient {currency}: need {required}, have {available}")]
    InsufficientCurrency {
        currency: Currency,
        required: u64,
        available: u64,
    },

    /// Every tome slot is occupied
    #[error("No empty tome slot")]
    NoEmptySlot,

    /// No accrued free/arena tome to claim
    #[error("No {0} tome available to claim")]
    NoTomeAvailable(&'static str),

    /// Card is not in the player's collection (or not enough copies)
    #[error("Card not owned: {0}")]
    CardNotOwned(String),

    /// Card cannot be upgraded further
    #[error("Card {card_id} already at max level {max_level}")]
    MaxLevelReached { card_id: String, max_level: u32 },

    /// An aggregate invariant was broken by some earlier bug
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    /// Creates a validation error for malformed input.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    /// Create an invariant violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Check a slot index against a slot array length.
    pub fn check_slot(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::SlotOutOfRange { index, len })
        }
    }

    /// True for failures the player can correct (wrong state, not enough
    /// currency, bad index). False for data gaps and invariant violations.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::NotFound { .. } | Self::InvariantViolation(_))
    }
}
