use std::fmt;

use rand::Rng;
use study_core::model::{Card, Deck, DeckId};
use study_core::{
    NavigationTarget, Outcome, StudyAction, StudyInput, StudyKey, StudyState, StudySummary,
};
use tracing::{debug, info};

use super::progress::StudyProgress;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A running study session over one deck.
///
/// Owns the deck it was opened for and the engine state; every transition is
/// forwarded to the engine and traced.
#[derive(Clone)]
pub struct StudySession {
    deck: Deck,
    state: StudyState,
}

impl StudySession {
    /// Start a session over `cards`, keeping their order.
    #[must_use]
    pub fn new(deck: Deck, cards: Vec<Card>) -> Self {
        Self {
            deck,
            state: StudyState::new(cards),
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn deck_id(&self) -> DeckId {
        self.deck.id()
    }

    /// Read-only engine state for rendering.
    #[must_use]
    pub fn state(&self) -> &StudyState {
        &self.state
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.state.current_card()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_completed()
    }

    // ─── Actions ──────────────────────────────────────────────────────────────

    pub fn flip(&mut self) {
        self.apply(StudyAction::Flip);
    }

    pub fn next(&mut self) {
        self.apply(StudyAction::Next);
    }

    pub fn previous(&mut self) {
        self.apply(StudyAction::Previous);
    }

    pub fn mark(&mut self, outcome: Outcome) {
        self.apply(StudyAction::Mark(outcome));
    }

    pub fn mark_correct(&mut self) {
        self.mark(Outcome::Correct);
    }

    pub fn mark_incorrect(&mut self) {
        self.mark(Outcome::Incorrect);
    }

    pub fn shuffle(&mut self) {
        self.apply(StudyAction::Shuffle);
    }

    /// Shuffle with a caller-supplied RNG (seeded in tests).
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.state.shuffle_with(rng);
        debug!(deck_id = %self.deck.id(), "session shuffled");
    }

    pub fn reset(&mut self) {
        self.apply(StudyAction::Reset);
    }

    /// Forward a key-bound input; ignored once the session is complete.
    pub fn handle_input(&mut self, input: StudyInput) -> bool {
        let applied = self.state.handle_input(input);
        if applied {
            self.trace(input.action());
        } else {
            debug!(deck_id = %self.deck.id(), ?input, "input ignored after completion");
        }
        applied
    }

    /// Forward a DOM-style key name. Unbound keys return `false`.
    pub fn handle_key(&mut self, key_name: &str) -> bool {
        StudyKey::from_key_name(key_name).is_some_and(|key| self.handle_input(key.input()))
    }

    fn apply(&mut self, action: StudyAction) {
        let was_complete = self.state.is_completed();
        self.state.apply(action);
        self.trace(action);
        if !was_complete && self.state.is_completed() {
            let summary = self.state.summary();
            info!(
                deck_id = %self.deck.id(),
                total = summary.total,
                correct = summary.correct,
                incorrect = summary.incorrect,
                "study session completed"
            );
        }
    }

    fn trace(&self, action: StudyAction) {
        debug!(
            deck_id = %self.deck.id(),
            ?action,
            cursor = self.state.cursor(),
            flipped = self.state.is_flipped(),
            studied = self.state.studied_count(),
            "study action applied"
        );
    }

    // ─── Derived ──────────────────────────────────────────────────────────────

    #[must_use]
    pub fn progress(&self) -> StudyProgress {
        let summary = self.state.summary();
        StudyProgress {
            position: self.state.position(),
            total: summary.total,
            studied: summary.studied,
            correct: summary.correct,
            incorrect: summary.incorrect,
            percent: self.state.progress_percent(),
            is_complete: self.state.is_completed(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> StudySummary {
        self.state.summary()
    }

    // ─── Navigation ───────────────────────────────────────────────────────────

    /// Where "Finish studying" / "Back to deck" leads.
    #[must_use]
    pub fn back_to_deck(&self) -> NavigationTarget {
        NavigationTarget::Deck(self.deck.id())
    }

    #[must_use]
    pub fn dashboard(&self) -> NavigationTarget {
        NavigationTarget::Dashboard
    }

    /// Destinations offered on the completion screen.
    #[must_use]
    pub fn exit_targets(&self) -> [NavigationTarget; 2] {
        [self.back_to_deck(), self.dashboard()]
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("deck_id", &self.deck.id())
            .field("cards_len", &self.state.len())
            .field("cursor", &self.state.cursor())
            .field("studied", &self.state.studied_count())
            .field("completed", &self.state.is_completed())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
