mod card;
mod deck;
mod ids;

pub use ids::{CardId, DeckId, ParseIdError, UserId, UserIdError};

pub use card::{Card, CardError};
pub use deck::{Deck, DeckError};
