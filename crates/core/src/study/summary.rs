/// Rounds `100 * part / whole` to the nearest integer, halves rounding up.
///
/// Returns 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    let pct = (part * 100 + whole / 2) / whole;
    u8::try_from(pct).unwrap_or(100)
}

/// Completion-screen numbers, derived from a session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudySummary {
    pub total: usize,
    pub studied: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl StudySummary {
    #[must_use]
    pub fn percent_correct(&self) -> u8 {
        rounded_percent(self.correct, self.total)
    }

    /// Cards that were marked either way.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}
