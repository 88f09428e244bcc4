use serde::Serialize;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudyProgress {
    /// One-based index of the current card, 0 for an empty session.
    pub position: usize,
    pub total: usize,
    pub studied: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub percent: u8,
    pub is_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_serializes_for_hosts() {
        let progress = StudyProgress {
            position: 2,
            total: 4,
            studied: 1,
            correct: 1,
            incorrect: 0,
            percent: 25,
            is_complete: false,
        };
        let value = serde_json::to_value(progress).unwrap();
        assert_eq!(value["percent"], 25);
        assert_eq!(value["is_complete"], false);
    }
}
