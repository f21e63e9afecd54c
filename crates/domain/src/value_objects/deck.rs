//! The player's active battle deck

use serde::{Deserialize, Serialize};

use crate::ids::CardId;

/// Cards the player currently battles with, one of which may lead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    leader: Option<CardId>,
    cards: Vec<CardId>,
}

impl Deck {
    pub fn new(leader: Option<CardId>, cards: Vec<CardId>) -> Self {
        Self { leader, cards }
    }

    pub fn leader(&self) -> Option<&CardId> {
        self.leader.as_ref()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// True if the card is the leader or one of the deck cards.
    pub fn contains(&self, card_id: &CardId) -> bool {
        self.is_leader(card_id) || self.cards.contains(card_id)
    }

    pub fn is_leader(&self, card_id: &CardId) -> bool {
        self.leader.as_ref() == Some(card_id)
    }

    /// Every card referenced by the deck, leader first.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardId> {
        self.leader.iter().chain(self.cards.iter())
    }
}
