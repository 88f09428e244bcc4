use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use study_core::model::{Card, CardId, Deck, DeckId, UserId};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Repository contract for decks.
///
/// Every read is scoped to an owner: a deck that belongs to someone else is
/// reported exactly like a missing one.
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// Persist or update a deck.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id is taken by another owner's deck.
    async fn upsert_deck(&self, deck: &Deck) -> Result<(), StorageError>;

    /// Fetch a deck by ID for its owner.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing deck is `Ok(None)`.
    async fn get_deck(&self, owner: &UserId, id: DeckId) -> Result<Option<Deck>, StorageError>;

    /// List an owner's decks, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_decks(&self, owner: &UserId) -> Result<Vec<Deck>, StorageError>;
}

#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Persist or update a card.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the card's deck does not exist.
    async fn upsert_card(&self, card: &Card) -> Result<(), StorageError>;

    /// Fetch every card of a deck owned by `owner`, most recently updated
    /// first (ties by ascending id). Empty if the deck is not theirs.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_deck_cards(
        &self,
        owner: &UserId,
        deck_id: DeckId,
    ) -> Result<Vec<Card>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    decks: Arc<Mutex<HashMap<DeckId, Deck>>>,
    cards: Arc<Mutex<HashMap<(DeckId, CardId), Card>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            decks: Arc::new(Mutex::new(HashMap::new())),
            cards: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn owns(&self, owner: &UserId, deck_id: DeckId) -> Result<bool, StorageError> {
        let guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&deck_id).is_some_and(|deck| deck.is_owned_by(owner)))
    }
}

#[async_trait]
impl DeckRepository for InMemoryRepository {
    async fn upsert_deck(&self, deck: &Deck) -> Result<(), StorageError> {
        let mut guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if let Some(existing) = guard.get(&deck.id()) {
            if existing.owner() != deck.owner() {
                return Err(StorageError::Conflict);
            }
        }
        guard.insert(deck.id(), deck.clone());
        Ok(())
    }

    async fn get_deck(&self, owner: &UserId, id: DeckId) -> Result<Option<Deck>, StorageError> {
        let guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).filter(|deck| deck.is_owned_by(owner)).cloned())
    }

    async fn list_decks(&self, owner: &UserId) -> Result<Vec<Deck>, StorageError> {
        let guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut decks: Vec<Deck> = guard
            .values()
            .filter(|deck| deck.is_owned_by(owner))
            .cloned()
            .collect();
        decks.sort_by_key(|d| (Reverse(d.updated_at()), d.id()));
        Ok(decks)
    }
}

#[async_trait]
impl CardRepository for InMemoryRepository {
    async fn upsert_card(&self, card: &Card) -> Result<(), StorageError> {
        let deck_exists = {
            let guard = self
                .decks
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            guard.contains_key(&card.deck_id())
        };
        if !deck_exists {
            return Err(StorageError::NotFound);
        }

        let mut guard = self
            .cards
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert((card.deck_id(), card.id()), card.clone());
        Ok(())
    }

    async fn list_deck_cards(
        &self,
        owner: &UserId,
        deck_id: DeckId,
    ) -> Result<Vec<Card>, StorageError> {
        if !self.owns(owner, deck_id)? {
            return Ok(Vec::new());
        }

        let guard = self
            .cards
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut cards: Vec<Card> = guard
            .iter()
            .filter(|((deck, _), _)| *deck == deck_id)
            .map(|(_, card)| card.clone())
            .collect();
        cards.sort_by_key(|c| (Reverse(c.updated_at()), c.id()));
        Ok(cards)
    }
}

/// Aggregates deck and card repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub decks: Arc<dyn DeckRepository>,
    pub cards: Arc<dyn CardRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let decks: Arc<dyn DeckRepository> = Arc::new(repo.clone());
        let cards: Arc<dyn CardRepository> = Arc::new(repo);
        Self { decks, cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_now;

    fn owner() -> UserId {
        UserId::new("user_1").unwrap()
    }

    fn build_deck(id: u64, owner: UserId) -> Deck {
        Deck::new(DeckId::new(id), owner, format!("Deck {id}"), None, fixed_now()).unwrap()
    }

    fn build_card(id: u64, deck_id: DeckId, minutes: i64) -> Card {
        let created = fixed_now();
        Card::from_persisted(
            CardId::new(id),
            deck_id,
            format!("Q{id}"),
            format!("A{id}"),
            created,
            created + chrono::Duration::minutes(minutes),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn cards_are_listed_newest_first_with_id_ties() {
        let repo = InMemoryRepository::new();
        let deck = build_deck(1, owner());
        repo.upsert_deck(&deck).await.unwrap();

        repo.upsert_card(&build_card(1, deck.id(), 0)).await.unwrap();
        repo.upsert_card(&build_card(2, deck.id(), 5)).await.unwrap();
        repo.upsert_card(&build_card(4, deck.id(), 0)).await.unwrap();
        repo.upsert_card(&build_card(3, deck.id(), 0)).await.unwrap();

        let ids: Vec<u64> = repo
            .list_deck_cards(&owner(), deck.id())
            .await
            .unwrap()
            .iter()
            .map(|c| c.id().value())
            .collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[tokio::test]
    async fn foreign_decks_are_invisible() {
        let repo = InMemoryRepository::new();
        let deck = build_deck(1, owner());
        repo.upsert_deck(&deck).await.unwrap();
        repo.upsert_card(&build_card(1, deck.id(), 0)).await.unwrap();

        let stranger = UserId::new("user_2").unwrap();
        assert!(repo.get_deck(&stranger, deck.id()).await.unwrap().is_none());
        assert!(repo.list_deck_cards(&stranger, deck.id()).await.unwrap().is_empty());
        assert!(repo.list_decks(&stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_deck_rejects_owner_change() {
        let repo = InMemoryRepository::new();
        repo.upsert_deck(&build_deck(1, owner())).await.unwrap();

        let err = repo
            .upsert_deck(&build_deck(1, UserId::new("user_2").unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn upsert_card_requires_deck() {
        let repo = InMemoryRepository::new();
        let err = repo
            .upsert_card(&build_card(1, DeckId::new(9), 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }
}
