//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use study_core::model::DeckId;

/// Errors emitted by `DeckService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while opening a study session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error("deck {0} not found")]
    DeckNotFound(DeckId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
