//! Player use cases.
//!
//! Account creation and the game events that move progression counters:
//! battles, deck changes and card upgrades.

mod create_player;
mod error;
mod record_battle;
mod set_deck;
mod upgrade_card;

use std::sync::Arc;

pub use create_player::CreatePlayer;
pub use error::PlayerError;
pub use record_battle::RecordBattle;
pub use set_deck::SetDeck;
pub use upgrade_card::UpgradeCard;

/// Container for player use cases.
pub struct PlayerUseCases {
    pub create: Arc<CreatePlayer>,
    pub record_battle: Arc<RecordBattle>,
    pub set_deck: Arc<SetDeck>,
    pub upgrade_card: Arc<UpgradeCard>,
}

impl PlayerUseCases {
    pub fn new(
        create: Arc<CreatePlayer>,
        record_battle: Arc<RecordBattle>,
        set_deck: Arc<SetDeck>,
        upgrade_card: Arc<UpgradeCard>,
    ) -> Self {
        Self {
            create,
            record_battle,
            set_deck,
            upgrade_card,
        }
    }
}
