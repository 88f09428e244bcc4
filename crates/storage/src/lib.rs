#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;

pub use repository::{CardRepository, DeckRepository, InMemoryRepository, Storage, StorageError};
pub use seed::{SeedCatalog, SeedError, SeedReport};
