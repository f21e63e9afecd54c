//! Use cases - player request orchestration.
//!
//! Each use case loads one player aggregate, applies a single progression
//! operation, and saves the whole document back. A rejected operation is
//! never saved.

pub mod player;
pub mod quests;
pub mod tomes;

pub use player::PlayerUseCases;
pub use quests::QuestUseCases;
pub use tomes::TomeUseCases;

use tomebound_domain::{DomainError, PlayerId, QuestEvent};

/// Log a rejected domain operation at the level its cause deserves.
pub(crate) fn log_rejection(player_id: PlayerId, operation: &'static str, error: &DomainError) {
    match error {
        DomainError::InvariantViolation(_) => tracing::error!(
            player_id = %player_id,
            operation,
            error = %error,
            "Progression invariant violated"
        ),
        error if error.is_validation() => tracing::debug!(
            player_id = %player_id,
            operation,
            error = %error,
            "Progression operation rejected"
        ),
        _ => tracing::warn!(
            player_id = %player_id,
            operation,
            error = %error,
            "Game data gap hit during progression operation"
        ),
    }
}

pub(crate) fn log_quest_events(player_id: PlayerId, events: &[QuestEvent]) {
    for event in events {
        match event {
            QuestEvent::Assigned { slot, quest_id } => tracing::info!(
                player_id = %player_id,
                slot,
                quest_id = %quest_id,
                "Quest assigned"
            ),
            QuestEvent::Expired { slot, quest_id } => tracing::info!(
                player_id = %player_id,
                slot,
                quest_id = %quest_id,
                "Quest expired"
            ),
            QuestEvent::Progressed {
                slot,
                quest_id,
                added,
                progress,
            } => tracing::debug!(
                player_id = %player_id,
                slot,
                quest_id = %quest_id,
                added,
                progress,
                "Quest progressed"
            ),
            QuestEvent::DefinitionMissing { slot, quest_id } => tracing::warn!(
                player_id = %player_id,
                slot,
                quest_id = %quest_id,
                "Quest definition missing from catalog"
            ),
        }
    }
}
