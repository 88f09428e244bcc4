use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::DeckId;

/// Logical destinations a host can route to when leaving a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationTarget {
    /// Detail view of the deck that was studied.
    Deck(DeckId),
    /// Global deck list.
    Dashboard,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown navigation target: {raw}")]
pub struct ParseNavigationError {
    raw: String,
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Deck(id) => write!(f, "deck:{id}"),
            NavigationTarget::Dashboard => f.write_str("dashboard"),
        }
    }
}

impl FromStr for NavigationTarget {
    type Err = ParseNavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "dashboard" {
            return Ok(Self::Dashboard);
        }
        s.strip_prefix("deck:")
            .and_then(|id| id.parse::<DeckId>().ok())
            .map(Self::Deck)
            .ok_or_else(|| ParseNavigationError { raw: s.to_owned() })
    }
}
