use std::sync::Arc;

use storage::repository::{CardRepository, DeckRepository, Storage};
use study_core::NavigationTarget;
use study_core::model::{Deck, DeckId, UserId};
use tracing::{info, warn};

use super::session::StudySession;
use crate::error::StudyError;

/// What the study view should show after loading a deck.
#[derive(Debug, Clone)]
pub enum StudyLaunch {
    /// The deck has no cards; the host shows an empty-state prompt instead of
    /// driving the engine.
    Empty { deck: Deck },
    Ready(StudySession),
}

impl StudyLaunch {
    #[must_use]
    pub fn deck(&self) -> &Deck {
        match self {
            StudyLaunch::Empty { deck } => deck,
            StudyLaunch::Ready(session) => session.deck(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, StudyLaunch::Empty { .. })
    }

    /// Target of the "Go to Deck" link on the empty state.
    #[must_use]
    pub fn back_to_deck(&self) -> NavigationTarget {
        NavigationTarget::Deck(self.deck().id())
    }

    #[must_use]
    pub fn into_session(self) -> Option<StudySession> {
        match self {
            StudyLaunch::Empty { .. } => None,
            StudyLaunch::Ready(session) => Some(session),
        }
    }
}

/// Loads a deck and its cards once and hands back a ready-to-drive session.
#[derive(Clone)]
pub struct StudyService {
    decks: Arc<dyn DeckRepository>,
    cards: Arc<dyn CardRepository>,
}

impl StudyService {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>, cards: Arc<dyn CardRepository>) -> Self {
        Self { decks, cards }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(Arc::clone(&storage.decks), Arc::clone(&storage.cards))
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory())
    }

    /// Open a study session for `user` on `deck_id`.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::DeckNotFound` when the deck is missing or owned by
    /// someone else, and `StudyError::Storage` on repository failures.
    pub async fn open(&self, user: &UserId, deck_id: DeckId) -> Result<StudyLaunch, StudyError> {
        let Some(deck) = self.decks.get_deck(user, deck_id).await? else {
            warn!(%deck_id, "study requested for unknown deck");
            return Err(StudyError::DeckNotFound(deck_id));
        };

        let cards = self.cards.list_deck_cards(user, deck_id).await?;
        if cards.is_empty() {
            info!(%deck_id, "deck has no cards to study");
            return Ok(StudyLaunch::Empty { deck });
        }

        info!(%deck_id, cards = cards.len(), "study session opened");
        Ok(StudyLaunch::Ready(StudySession::new(deck, cards)))
    }
}
