//! Study-session engine.
//!
//! A [`StudyState`] is created from the full card list of a deck and then driven
//! one discrete action at a time (flip, navigate, mark, shuffle, reset). Every
//! value a host renders (current card, progress, counts, summary) is derived
//! from the state on demand and never stored.

mod input;
mod navigation;
mod outcome;
mod shuffle;
mod state;
mod summary;

pub use input::{StudyInput, StudyKey};
pub use navigation::{NavigationTarget, ParseNavigationError};
pub use outcome::Outcome;
pub use shuffle::shuffled;
pub use state::{CardSide, StudyAction, StudyState, StudyStateError};
pub use summary::{StudySummary, rounded_percent};
