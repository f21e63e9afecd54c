//! Set deck use case.

use std::sync::Arc;

use tomebound_domain::{Deck, PlayerId};

use crate::infrastructure::ports::PlayerRepo;
use crate::use_cases::log_rejection;

use super::error::PlayerError;

/// Replace the player's battle deck. Quest card constraints are checked
/// against whatever deck is current when battles are recorded.
pub struct SetDeck {
    players: Arc<dyn PlayerRepo>,
}

impl SetDeck {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    pub async fn execute(&self, player_id: PlayerId, deck: Deck) -> Result<(), PlayerError> {
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(PlayerError::PlayerNotFound(player_id))?;

        let size = deck.all_cards().count();
        player
            .set_deck(deck)
            .inspect_err(|e| log_rejection(player_id, "set_deck", e))?;

        self.players.save(&player).await?;
        tracing::info!(player_id = %player_id, cards = size, "Deck updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{repo_with, test_player};
    use tomebound_domain::{CardId, DomainError};

    #[tokio::test]
    async fn owned_cards_replace_deck() {
        let player = test_player();
        let player_id = player.id();
        let deck = Deck::new(Some(CardId::new("knight")), vec![CardId::new("squire")]);
        let expected = deck.clone();
        let mut repo = repo_with(player);
        repo.expect_save()
            .withf(move |saved| saved.deck() == &expected)
            .times(1)
            .returning(|_| Ok(()));

        SetDeck::new(Arc::new(repo))
            .execute(player_id, deck)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unowned_leader_is_rejected() {
        let player = test_player();
        let player_id = player.id();
        let mut repo = repo_with(player);
        repo.expect_save().never();

        let result = SetDeck::new(Arc::new(repo))
            .execute(
                player_id,
                Deck::new(Some(CardId::new("dragon")), vec![CardId::new("squire")]),
            )
            .await;

        assert!(matches!(
            result,
            Err(PlayerError::Validation(DomainError::CardNotOwned(_)))
        ));
    }
}
