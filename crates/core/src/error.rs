use thiserror::Error;

use crate::model::{CardError, DeckError, ParseIdError, UserIdError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
    #[error(transparent)]
    UserId(#[from] UserIdError),
}
