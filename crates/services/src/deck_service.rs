use std::sync::Arc;

use serde::Serialize;
use storage::repository::{CardRepository, DeckRepository, Storage};
use study_core::model::{Deck, UserId};

use crate::error::DeckServiceError;

/// Dashboard row: a deck with the number of cards it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckOverview {
    pub deck: Deck,
    pub card_count: usize,
}

impl DeckOverview {
    /// Whether the deck can be studied at all.
    #[must_use]
    pub fn is_studyable(&self) -> bool {
        self.card_count > 0
    }
}

/// Read side of the deck list shown on the dashboard.
#[derive(Clone)]
pub struct DeckService {
    decks: Arc<dyn DeckRepository>,
    cards: Arc<dyn CardRepository>,
}

impl DeckService {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>, cards: Arc<dyn CardRepository>) -> Self {
        Self { decks, cards }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(Arc::clone(&storage.decks), Arc::clone(&storage.cards))
    }

    /// List the user's decks, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if repository access fails.
    pub async fn list_decks(&self, owner: &UserId) -> Result<Vec<DeckOverview>, DeckServiceError> {
        let decks = self.decks.list_decks(owner).await?;
        let mut out = Vec::with_capacity(decks.len());
        for deck in decks {
            let card_count = self.cards.list_deck_cards(owner, deck.id()).await?.len();
            out.push(DeckOverview { deck, card_count });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use study_core::model::{Card, CardId, DeckId};
    use study_core::time::fixed_now;

    #[tokio::test]
    async fn list_decks_counts_cards() {
        let repo = InMemoryRepository::new();
        let owner = UserId::new("user_1").unwrap();
        let now = fixed_now();

        let older = Deck::new(DeckId::new(1), owner.clone(), "Spanish", None, now).unwrap();
        let newer = Deck::new(
            DeckId::new(2),
            owner.clone(),
            "Empty",
            None,
            now + chrono::Duration::minutes(1),
        )
        .unwrap();
        repo.upsert_deck(&older).await.unwrap();
        repo.upsert_deck(&newer).await.unwrap();
        for id in 1..=2 {
            let card = Card::new(CardId::new(id), older.id(), "Q", "A", now).unwrap();
            repo.upsert_card(&card).await.unwrap();
        }

        let service = DeckService::new(Arc::new(repo.clone()), Arc::new(repo));
        let items = service.list_decks(&owner).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].deck.name(), "Empty");
        assert!(!items[0].is_studyable());
        assert_eq!(items[1].card_count, 2);
        assert!(items[1].is_studyable());
    }
}
