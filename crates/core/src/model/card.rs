use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CardId, DeckId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card front cannot be empty")]
    EmptyFront,

    #[error("card back cannot be empty")]
    EmptyBack,

    #[error("updated_at is before created_at")]
    InvalidTimeRange,
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// A front/back text pair belonging to exactly one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardRecord")]
pub struct Card {
    id: CardId,
    deck_id: DeckId,
    front: String,
    back: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Card {
    /// Creates a freshly written card (`updated_at == created_at`).
    ///
    /// # Errors
    ///
    /// Returns `CardError::EmptyFront` / `CardError::EmptyBack` for blank sides.
    pub fn new(
        id: CardId,
        deck_id: DeckId,
        front: impl Into<String>,
        back: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CardError> {
        Self::from_persisted(id, deck_id, front, back, created_at, created_at)
    }

    /// Rehydrates a card from storage.
    ///
    /// # Errors
    ///
    /// Returns `CardError` if a side is blank or the timestamps are out of order.
    pub fn from_persisted(
        id: CardId,
        deck_id: DeckId,
        front: impl Into<String>,
        back: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, CardError> {
        let front = front.into().trim().to_owned();
        if front.is_empty() {
            return Err(CardError::EmptyFront);
        }
        let back = back.into().trim().to_owned();
        if back.is_empty() {
            return Err(CardError::EmptyBack);
        }
        if updated_at < created_at {
            return Err(CardError::InvalidTimeRange);
        }

        Ok(Self {
            id,
            deck_id,
            front,
            back,
            created_at,
            updated_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn deck_id(&self) -> DeckId {
        self.deck_id
    }

    #[must_use]
    pub fn front(&self) -> &str {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// Stored rows go back through `from_persisted`.
#[derive(Deserialize)]
struct CardRecord {
    id: CardId,
    deck_id: DeckId,
    front: String,
    back: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CardRecord> for Card {
    type Error = CardError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        Self::from_persisted(
            record.id,
            record.deck_id,
            record.front,
            record.back,
            record.created_at,
            record.updated_at,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
