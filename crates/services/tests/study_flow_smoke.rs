use std::sync::Arc;

use async_trait::async_trait;
use services::{StudyError, StudyLaunch, StudyService};
use storage::repository::{
    CardRepository, DeckRepository, InMemoryRepository, StorageError,
};
use study_core::model::{Card, CardId, Deck, DeckId, UserId};
use study_core::time::fixed_now;
use study_core::{NavigationTarget, Outcome};

fn owner() -> UserId {
    UserId::new("user_35S7DBaLlvlzXLrYzO0TN5doVhH").unwrap()
}

async fn seed_deck(repo: &InMemoryRepository, deck_id: DeckId, cards: &[(&str, &str)]) {
    let now = fixed_now();
    let deck = Deck::new(deck_id, owner(), "Smoke Deck", None, now).unwrap();
    repo.upsert_deck(&deck).await.unwrap();

    for (offset, (front, back)) in cards.iter().enumerate() {
        let id = deck_id.value() * 100 + offset as u64;
        let card = Card::new(CardId::new(id), deck_id, *front, *back, now).unwrap();
        repo.upsert_card(&card).await.unwrap();
    }
}

#[tokio::test]
async fn study_flow_runs_to_summary() {
    let repo = InMemoryRepository::new();
    let deck_id = DeckId::new(1);
    seed_deck(&repo, deck_id, &[("Hello", "Hola"), ("Bye", "Adiós"), ("Water", "Agua")]).await;

    let service = StudyService::new(Arc::new(repo.clone()), Arc::new(repo));
    let mut session = service
        .open(&owner(), deck_id)
        .await
        .unwrap()
        .into_session()
        .expect("deck has cards");

    let mut marks = [Outcome::Correct, Outcome::Incorrect, Outcome::Correct].into_iter();
    while !session.is_complete() {
        assert!(session.handle_key(" "));
        let outcome = marks.next().expect("one mark per card");
        session.mark(outcome);
    }

    let summary = session.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.incorrect, 1);
    assert_eq!(summary.percent_correct(), 67);
    assert_eq!(session.progress().percent, 100);
    assert!(!session.handle_key("ArrowLeft"));
    assert_eq!(session.exit_targets()[0], NavigationTarget::Deck(deck_id));

    session.reset();
    assert!(!session.is_complete());
    assert_eq!(session.progress().studied, 0);
}

#[tokio::test]
async fn empty_deck_launches_empty_state() {
    let repo = InMemoryRepository::new();
    let deck_id = DeckId::new(2);
    seed_deck(&repo, deck_id, &[]).await;

    let service = StudyService::new(Arc::new(repo.clone()), Arc::new(repo));
    let launch = service.open(&owner(), deck_id).await.unwrap();

    assert!(matches!(launch, StudyLaunch::Empty { .. }));
    assert_eq!(launch.back_to_deck().to_string(), "deck:2");
}

struct Unreachable;

#[async_trait]
impl DeckRepository for Unreachable {
    async fn upsert_deck(&self, _deck: &Deck) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn get_deck(&self, _owner: &UserId, _id: DeckId) -> Result<Option<Deck>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn list_decks(&self, _owner: &UserId) -> Result<Vec<Deck>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[async_trait]
impl CardRepository for Unreachable {
    async fn upsert_card(&self, _card: &Card) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn list_deck_cards(
        &self,
        _owner: &UserId,
        _deck_id: DeckId,
    ) -> Result<Vec<Card>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[tokio::test]
async fn storage_failures_surface_as_study_errors() {
    let service = StudyService::new(Arc::new(Unreachable), Arc::new(Unreachable));
    let err = service.open(&owner(), DeckId::new(1)).await.unwrap_err();

    assert!(matches!(err, StudyError::Storage(StorageError::Connection(_))));
}
