use crate::study::state::StudyAction;

/// Logical inputs a host forwards while a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyInput {
    MoveBack,
    MoveForward,
    ToggleFlip,
}

impl StudyInput {
    #[must_use]
    pub fn action(self) -> StudyAction {
        match self {
            StudyInput::MoveBack => StudyAction::Previous,
            StudyInput::MoveForward => StudyAction::Next,
            StudyInput::ToggleFlip => StudyAction::Flip,
        }
    }
}

/// Default keyboard bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyKey {
    ArrowLeft,
    ArrowRight,
    Space,
}

impl StudyKey {
    /// Maps a DOM-style key name (`"ArrowLeft"`, `"ArrowRight"`, `" "`) to a binding.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            " " | "Space" | "Spacebar" => Some(Self::Space),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StudyKey::ArrowLeft => "←",
            StudyKey::ArrowRight => "→",
            StudyKey::Space => "Space",
        }
    }

    #[must_use]
    pub fn input(self) -> StudyInput {
        match self {
            StudyKey::ArrowLeft => StudyInput::MoveBack,
            StudyKey::ArrowRight => StudyInput::MoveForward,
            StudyKey::Space => StudyInput::ToggleFlip,
        }
    }
}

impl From<StudyKey> for StudyInput {
    fn from(key: StudyKey) -> Self {
        key.input()
    }
}
