//! Owned cards

use serde::{Deserialize, Serialize};

use crate::ids::CardId;

/// Result of removing copies of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChangeResult {
    /// New quantity after subtraction
    Updated(u32),
    /// Not enough copies; nothing was removed
    Insufficient { available: u32 },
}

/// A card in the player's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedCard {
    pub card_id: CardId,
    /// Copies held (not yet spent on upgrades).
    pub count: u32,
    pub level: u32,
}

/// The player's collection, in acquisition order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardCollection(Vec<OwnedCard>);

impl CardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, card_id: &CardId) -> Option<&OwnedCard> {
        self.0.iter().find(|c| &c.card_id == card_id)
    }

    pub fn get_mut(&mut self, card_id: &CardId) -> Option<&mut OwnedCard> {
        self.0.iter_mut().find(|c| &c.card_id == card_id)
    }

    pub fn owns(&self, card_id: &CardId) -> bool {
        self.get(card_id).is_some()
    }

    pub fn count_of(&self, card_id: &CardId) -> u32 {
        self.get(card_id).map(|c| c.count).unwrap_or(0)
    }

    /// Add copies, creating a level 1 entry for a new card.
    pub fn add(&mut self, card_id: &CardId, count: u32) {
        match self.get_mut(card_id) {
            Some(owned) => owned.count = owned.count.saturating_add(count),
            None => self.0.push(OwnedCard {
                card_id: card_id.clone(),
                count,
                level: 1,
            }),
        }
    }

    /// Remove copies; leaves the collection unchanged when short.
    ///
    /// The entry itself is kept at zero copies so its level survives.
    pub fn remove(&mut self, card_id: &CardId, count: u32) -> QuantityChangeResult {
        match self.get_mut(card_id) {
            Some(owned) if owned.count >= count => {
                owned.count -= count;
                QuantityChangeResult::Updated(owned.count)
            }
            Some(owned) => QuantityChangeResult::Insufficient {
                available: owned.count,
            },
            None => QuantityChangeResult::Insufficient { available: 0 },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OwnedCard> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_creates_level_one_entry() {
        let mut collection = CardCollection::new();
        let id = CardId::new("card_knight");
        collection.add(&id, 3);
        collection.add(&id, 2);
        let owned = collection.get(&id).unwrap();
        assert_eq!(owned.count, 5);
        assert_eq!(owned.level, 1);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_partial() {
        let mut collection = CardCollection::new();
        let id = CardId::new("card_knight");
        collection.add(&id, 5);
        assert_eq!(collection.remove(&id, 3), QuantityChangeResult::Updated(2));
    }

    #[test]
    fn remove_insufficient_leaves_count() {
        let mut collection = CardCollection::new();
        let id = CardId::new("card_knight");
        collection.add(&id, 2);
        assert_eq!(
            collection.remove(&id, 3),
            QuantityChangeResult::Insufficient { available: 2 }
        );
        assert_eq!(collection.count_of(&id), 2);
    }

    #[test]
    fn remove_unknown_card() {
        let mut collection = CardCollection::new();
        assert_eq!(
            collection.remove(&CardId::new("nope"), 1),
            QuantityChangeResult::Insufficient { available: 0 }
        );
    }
}
