use serde::{Deserialize, Serialize};

/// User-asserted judgment for a card within the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }

    /// Single-glyph mark used next to the card counter.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Outcome::Correct => "✓",
            Outcome::Incorrect => "✗",
        }
    }
}
