use std::collections::{BTreeMap, BTreeSet, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Card, CardId};
use crate::study::input::StudyInput;
use crate::study::outcome::Outcome;
use crate::study::shuffle::shuffled;
use crate::study::summary::{StudySummary, rounded_percent};

//
// ─── ACTIONS ───────────────────────────────────────────────────────────────────
//

/// A single discrete transition of a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyAction {
    Flip,
    Next,
    Previous,
    Mark(Outcome),
    Shuffle,
    Reset,
}

/// Which face of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Rejections when rehydrating a serialized state record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyStateError {
    #[error("card {0} appears more than once in the session order")]
    DuplicateCard(CardId),

    #[error("cursor {cursor} is out of range for {len} cards")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("studied card {0} is not part of the session")]
    UnknownStudiedCard(CardId),

    #[error("card {0} has an outcome but was never studied")]
    OutcomeWithoutStudy(CardId),

    #[error("session marked complete with {studied} of {len} cards studied")]
    PrematureCompletion { studied: usize, len: usize },
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Complete state of one study session.
///
/// Invariants kept by every transition:
/// - `order` is a permutation of the cards the session was created with
/// - `cursor < order.len()` whenever the order is non-empty, else `cursor == 0`
/// - `studied` only holds ids present in `order`
/// - every key of `results` is in `studied`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StudyStateRecord")]
pub struct StudyState {
    order: Vec<Card>,
    cursor: usize,
    flipped: bool,
    studied: BTreeSet<CardId>,
    results: BTreeMap<CardId, Outcome>,
    completed: bool,
}

impl StudyState {
    /// Starts a session over `cards` in the given order.
    ///
    /// An empty list is accepted; the session then has no current card and
    /// every percentage reads 0.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            order: cards,
            cursor: 0,
            flipped: false,
            studied: BTreeSet::new(),
            results: BTreeMap::new(),
            completed: false,
        }
    }

    // ─── Transitions ──────────────────────────────────────────────────────────

    /// Applies one action. `Shuffle` draws from the thread-local RNG.
    pub fn apply(&mut self, action: StudyAction) {
        match action {
            StudyAction::Flip => self.flip(),
            StudyAction::Next => self.next(),
            StudyAction::Previous => self.previous(),
            StudyAction::Mark(outcome) => self.mark_outcome(outcome),
            StudyAction::Shuffle => self.shuffle(),
            StudyAction::Reset => self.reset(),
        }
    }

    /// Routes a key-bound input. Inputs are ignored once the session is
    /// complete; returns whether the input was applied.
    pub fn handle_input(&mut self, input: StudyInput) -> bool {
        if self.completed {
            return false;
        }
        self.apply(input.action());
        true
    }

    /// Toggles the visible side. Revealing the back counts as studying the card.
    pub fn flip(&mut self) {
        let Some(id) = self.current_card().map(Card::id) else {
            return;
        };
        self.flipped = !self.flipped;
        if self.flipped {
            self.studied.insert(id);
        }
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.order.len() {
            self.cursor += 1;
            self.flipped = false;
        }
    }

    pub fn previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.flipped = false;
        }
    }

    /// Records `outcome` for the current card, then either completes the
    /// session (every card studied) or advances by exactly one position.
    ///
    /// The advance is linear: it may land on a card that was already studied.
    pub fn mark_outcome(&mut self, outcome: Outcome) {
        let Some(id) = self.current_card().map(Card::id) else {
            return;
        };
        self.results.insert(id, outcome);
        self.studied.insert(id);

        if self.studied.len() == self.order.len() {
            self.completed = true;
        } else if self.cursor + 1 < self.order.len() {
            self.cursor += 1;
            self.flipped = false;
        }
    }

    /// Reorders the current order with the thread-local RNG and restarts.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Reorders the current order (shuffles compound) and restarts.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order = shuffled(&self.order, rng);
        self.restart();
    }

    /// Restarts the session keeping the current order.
    pub fn reset(&mut self) {
        self.restart();
    }

    fn restart(&mut self) {
        self.cursor = 0;
        self.flipped = false;
        self.studied.clear();
        self.results.clear();
        self.completed = false;
    }

    // ─── Derived values ───────────────────────────────────────────────────────

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.order.get(self.cursor)
    }

    /// Text of the face currently showing.
    #[must_use]
    pub fn visible_text(&self) -> Option<&str> {
        let card = self.current_card()?;
        Some(match self.visible_side() {
            CardSide::Front => card.front(),
            CardSide::Back => card.back(),
        })
    }

    #[must_use]
    pub fn visible_side(&self) -> CardSide {
        if self.flipped {
            CardSide::Back
        } else {
            CardSide::Front
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// One-based position for "Card i of n" labels.
    #[must_use]
    pub fn position(&self) -> usize {
        if self.order.is_empty() {
            0
        } else {
            self.cursor + 1
        }
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.order.len()
    }

    #[must_use]
    pub fn studied(&self) -> &BTreeSet<CardId> {
        &self.studied
    }

    #[must_use]
    pub fn studied_count(&self) -> usize {
        self.studied.len()
    }

    #[must_use]
    pub fn is_studied(&self, id: CardId) -> bool {
        self.studied.contains(&id)
    }

    #[must_use]
    pub fn results(&self) -> &BTreeMap<CardId, Outcome> {
        &self.results
    }

    #[must_use]
    pub fn outcome_for(&self, id: CardId) -> Option<Outcome> {
        self.results.get(&id).copied()
    }

    /// Outcome already recorded for the card under the cursor.
    #[must_use]
    pub fn current_outcome(&self) -> Option<Outcome> {
        self.current_card().and_then(|card| self.outcome_for(card.id()))
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        rounded_percent(self.studied.len(), self.order.len())
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.values().filter(|o| o.is_correct()).count()
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.results.len() - self.correct_count()
    }

    #[must_use]
    pub fn summary(&self) -> StudySummary {
        StudySummary {
            total: self.order.len(),
            studied: self.studied.len(),
            correct: self.correct_count(),
            incorrect: self.incorrect_count(),
        }
    }
}

//
// ─── SERIALIZED RECORD ─────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct StudyStateRecord {
    order: Vec<Card>,
    cursor: usize,
    flipped: bool,
    studied: BTreeSet<CardId>,
    results: BTreeMap<CardId, Outcome>,
    completed: bool,
}

impl TryFrom<StudyStateRecord> for StudyState {
    type Error = StudyStateError;

    fn try_from(record: StudyStateRecord) -> Result<Self, Self::Error> {
        let mut ids = HashSet::with_capacity(record.order.len());
        for card in &record.order {
            if !ids.insert(card.id()) {
                return Err(StudyStateError::DuplicateCard(card.id()));
            }
        }

        let len = record.order.len();
        let cursor_ok = if len == 0 {
            record.cursor == 0
        } else {
            record.cursor < len
        };
        if !cursor_ok {
            return Err(StudyStateError::CursorOutOfRange {
                cursor: record.cursor,
                len,
            });
        }

        if let Some(id) = record.studied.iter().find(|id| !ids.contains(*id)) {
            return Err(StudyStateError::UnknownStudiedCard(*id));
        }
        if let Some(id) = record.results.keys().find(|id| !record.studied.contains(*id)) {
            return Err(StudyStateError::OutcomeWithoutStudy(*id));
        }
        if record.completed && record.studied.len() != len {
            return Err(StudyStateError::PrematureCompletion {
                studied: record.studied.len(),
                len,
            });
        }

        Ok(Self {
            order: record.order,
            cursor: record.cursor,
            flipped: record.flipped,
            studied: record.studied,
            results: record.results,
            completed: record.completed,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
