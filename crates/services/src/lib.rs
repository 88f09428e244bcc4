#![forbid(unsafe_code)]

pub mod deck_service;
pub mod error;
pub mod sessions;


pub use deck_service::{DeckOverview, DeckService};
pub use error::{DeckServiceError, StudyError};

pub use sessions::{StudyLaunch, StudyProgress, StudyService, StudySession};
