//! Example-deck catalogue import.
//!
//! A catalogue is a JSON document listing decks with their cards. Importing
//! it assigns sequential ids (like identity columns) and stamps every row with
//! the supplied clock, one tick per deck so the newest deck lists first.

use std::path::Path;

use chrono::Duration;
use serde::Deserialize;
use study_core::Clock;
use study_core::model::{Card, CardError, CardId, Deck, DeckError, DeckId, UserId};
use thiserror::Error;

use crate::repository::{CardRepository, DeckRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error("failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalogue: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedCatalog {
    pub decks: Vec<SeedDeck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedDeck {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cards: Vec<SeedCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedCard {
    pub front: String,
    pub back: String,
}

/// Counts of what an import wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub deck_ids: Vec<DeckId>,
    pub cards: usize,
}

impl SeedCatalog {
    /// Parse a catalogue from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Parse` for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse a catalogue file.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Io` or `SeedError::Parse`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.decks.iter().map(|d| d.cards.len()).sum()
    }

    /// Write every deck and card for `owner`.
    ///
    /// Validation runs before anything is written, so a bad card leaves the
    /// repositories untouched.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Deck` / `SeedError::Card` for invalid rows and
    /// `SeedError::Storage` for repository failures.
    pub async fn import(
        &self,
        owner: &UserId,
        clock: &mut Clock,
        decks: &dyn DeckRepository,
        cards: &dyn CardRepository,
    ) -> Result<SeedReport, SeedError> {
        let mut next_card_id = 1_u64;
        let mut staged = Vec::with_capacity(self.decks.len());

        for (index, seed) in self.decks.iter().enumerate() {
            let now = clock.now();
            let deck_id = DeckId::new(index as u64 + 1);
            let deck = Deck::new(
                deck_id,
                owner.clone(),
                seed.name.clone(),
                seed.description.clone(),
                now,
            )?;

            let mut deck_cards = Vec::with_capacity(seed.cards.len());
            for card in &seed.cards {
                deck_cards.push(Card::new(
                    CardId::new(next_card_id),
                    deck_id,
                    card.front.clone(),
                    card.back.clone(),
                    now,
                )?);
                next_card_id += 1;
            }

            staged.push((deck, deck_cards));
            clock.advance(Duration::seconds(1));
        }

        let mut report = SeedReport {
            deck_ids: Vec::with_capacity(staged.len()),
            cards: 0,
        };
        for (deck, deck_cards) in staged {
            decks.upsert_deck(&deck).await?;
            for card in &deck_cards {
                cards.upsert_card(card).await?;
            }
            report.deck_ids.push(deck.id());
            report.cards += deck_cards.len();
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use study_core::time::fixed_clock;

    const CATALOG: &str = r#"{
        "decks": [
            { "name": "Spanish", "description": "words",
              "cards": [ { "front": "Hello", "back": "Hola" }, { "front": "Bye", "back": "Adiós" } ] },
            { "name": "Empty" }
        ]
    }"#;

    #[test]
    fn parses_optional_fields() {
        let catalog = SeedCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.decks.len(), 2);
        assert_eq!(catalog.decks[1].description, None);
        assert!(catalog.decks[1].cards.is_empty());
        assert_eq!(catalog.card_count(), 2);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SeedCatalog::from_json("{ \"decks\": 3 }").unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[tokio::test]
    async fn import_assigns_sequential_ids_and_keeps_card_order() {
        let repo = InMemoryRepository::new();
        let owner = UserId::new("user_1").unwrap();
        let mut clock = fixed_clock();

        let report = SeedCatalog::from_json(CATALOG)
            .unwrap()
            .import(&owner, &mut clock, &repo, &repo)
            .await
            .unwrap();

        assert_eq!(report.deck_ids, vec![DeckId::new(1), DeckId::new(2)]);
        assert_eq!(report.cards, 2);

        let listed = repo.list_decks(&owner).await.unwrap();
        assert_eq!(listed[0].name(), "Empty");

        let cards = repo.list_deck_cards(&owner, DeckId::new(1)).await.unwrap();
        let fronts: Vec<_> = cards.iter().map(Card::front).collect();
        assert_eq!(fronts, vec!["Hello", "Bye"]);
    }

    #[tokio::test]
    async fn invalid_card_writes_nothing() {
        let repo = InMemoryRepository::new();
        let owner = UserId::new("user_1").unwrap();
        let catalog = SeedCatalog {
            decks: vec![SeedDeck {
                name: "Broken".into(),
                description: None,
                cards: vec![SeedCard {
                    front: "Q".into(),
                    back: "  ".into(),
                }],
            }],
        };

        let err = catalog
            .import(&owner, &mut fixed_clock(), &repo, &repo)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::Card(CardError::EmptyBack)));
        assert!(repo.list_decks(&owner).await.unwrap().is_empty());
    }
}
