//! Line-oriented study view for a terminal.

use services::{DeckOverview, StudySession};
use study_core::{CardSide, NavigationTarget, Outcome, StudyKey, StudyState};

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Key(StudyKey),
    Mark(Outcome),
    Shuffle,
    Reset,
    Leave(NavigationTarget),
    Help,
    Unknown(String),
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit(NavigationTarget),
}

#[must_use]
pub fn parse_command(line: &str, session: &StudySession) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "space" | "f" => Command::Key(StudyKey::Space),
        "left" | "h" | "p" => Command::Key(StudyKey::ArrowLeft),
        "right" | "l" | "n" => Command::Key(StudyKey::ArrowRight),
        "c" => Command::Mark(Outcome::Correct),
        "x" | "i" => Command::Mark(Outcome::Incorrect),
        "s" => Command::Shuffle,
        "r" => Command::Reset,
        "q" => Command::Leave(session.back_to_deck()),
        "d" => Command::Leave(session.dashboard()),
        "?" | "help" => Command::Help,
        other => Command::Unknown(other.to_owned()),
    }
}

/// Applies a command and returns the text to print plus the next step.
pub fn execute(session: &mut StudySession, command: Command) -> (String, Step) {
    let text = match command {
        Command::Key(key) => {
            if session.handle_input(key.input()) {
                render_card(session)
            } else {
                completion_hint()
            }
        }
        Command::Mark(outcome) => {
            if session.is_complete() {
                completion_hint()
            } else if !session.state().is_flipped() {
                "Reveal the back first (Space / f).".to_owned()
            } else {
                session.mark(outcome);
                render(session)
            }
        }
        Command::Shuffle => {
            session.shuffle();
            render(session)
        }
        Command::Reset => {
            session.reset();
            render(session)
        }
        Command::Leave(target) => return (format!("→ {target}"), Step::Exit(target)),
        Command::Help => help(),
        Command::Unknown(raw) => format!("unknown command: {raw} (? for help)"),
    };
    (text, Step::Continue)
}

#[must_use]
pub fn render(session: &StudySession) -> String {
    if session.is_complete() {
        render_summary(session)
    } else {
        render_card(session)
    }
}

#[must_use]
pub fn render_card(session: &StudySession) -> String {
    let progress = session.progress();
    let state = session.state();
    let mut out = format!(
        "Progress {:>3}%  ✓ {}  ✗ {}  {} / {}\n",
        progress.percent, progress.correct, progress.incorrect, progress.studied, progress.total
    );

    out.push_str(&format!("Card {} of {}", progress.position, progress.total));
    if let Some(outcome) = state.current_outcome() {
        out.push_str(&format!(" {}", outcome.symbol()));
    }
    let moves = available_moves(state);
    if !moves.is_empty() {
        out.push_str(&format!("  [{moves}]"));
    }
    out.push('\n');

    let (label, hint) = match state.visible_side() {
        CardSide::Front => ("Front", "Space to reveal the answer"),
        CardSide::Back => ("Back", "Did you get it right? c = correct, x = incorrect"),
    };
    out.push_str(&format!(
        "[{label}] {}\n{hint}",
        state.visible_text().unwrap_or_default()
    ));
    out
}

/// Previous/next are only offered away from the ends of the deck.
fn available_moves(state: &StudyState) -> String {
    let mut moves = Vec::with_capacity(2);
    if !state.is_first() {
        moves.push(format!("{} previous", StudyKey::ArrowLeft.label()));
    }
    if !state.is_last() {
        moves.push(format!("{} next", StudyKey::ArrowRight.label()));
    }
    moves.join(" | ")
}

#[must_use]
pub fn render_summary(session: &StudySession) -> String {
    let summary = session.summary();
    let [deck, dashboard] = session.exit_targets();
    format!(
        "Study complete!\n{} / {}  ({}% correct)\n✓ {} correct  ✗ {} incorrect\n\
         s = study again (shuffled), r = restart, q = back to {deck}, d = {dashboard}",
        summary.correct,
        summary.total,
        summary.percent_correct(),
        summary.correct,
        summary.incorrect,
    )
}

#[must_use]
pub fn render_empty(deck_name: &str, target: NavigationTarget) -> String {
    format!(
        "{deck_name}: no cards to study yet. Add some cards to get started! (→ {target})"
    )
}

#[must_use]
pub fn render_deck_list(items: &[DeckOverview]) -> String {
    if items.is_empty() {
        return "No decks yet.".to_owned();
    }
    items
        .iter()
        .map(|item| {
            let desc = item.deck.description().unwrap_or("");
            let cards = if item.is_studyable() {
                format!("{:>3} cards", item.card_count)
            } else {
                "  (empty)".to_owned()
            };
            format!(
                "{:>4}  {:<40} {cards}  {desc}",
                item.deck.id(),
                item.deck.name(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn completion_hint() -> String {
    "Session complete: s = shuffle, r = restart, q = back to deck, d = dashboard.".to_owned()
}

#[must_use]
pub fn help() -> String {
    [
        "Keys:".to_owned(),
        format!("  {:<6} left | h | p     previous card", StudyKey::ArrowLeft.label()),
        format!("  {:<6} right | l | n    next card", StudyKey::ArrowRight.label()),
        format!("  {:<6} (empty) | f      flip card", StudyKey::Space.label()),
        "  c / x                 mark correct / incorrect (after flipping)".to_owned(),
        "  s / r                 shuffle / reset progress".to_owned(),
        "  q / d                 finish (back to deck) / dashboard".to_owned(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::{Card, CardId, Deck, DeckId, UserId};
    use study_core::time::fixed_now;

    fn session() -> StudySession {
        let deck = Deck::new(
            DeckId::new(4),
            UserId::new("user_1").unwrap(),
            "Spanish",
            None,
            fixed_now(),
        )
        .unwrap();
        let cards = vec![
            Card::new(CardId::new(1), deck.id(), "Hello", "Hola", fixed_now()).unwrap(),
            Card::new(CardId::new(2), deck.id(), "Bye", "Adiós", fixed_now()).unwrap(),
        ];
        StudySession::new(deck, cards)
    }

    #[test]
    fn parses_bindings() {
        let s = session();
        assert_eq!(parse_command("", &s), Command::Key(StudyKey::Space));
        assert_eq!(parse_command(" N ", &s), Command::Key(StudyKey::ArrowRight));
        assert_eq!(parse_command("c", &s), Command::Mark(Outcome::Correct));
        assert_eq!(
            parse_command("q", &s),
            Command::Leave(NavigationTarget::Deck(DeckId::new(4)))
        );
        assert_eq!(parse_command("zz", &s), Command::Unknown("zz".into()));
    }

    #[test]
    fn marking_requires_reveal() {
        let mut s = session();
        let (text, _) = execute(&mut s, Command::Mark(Outcome::Correct));
        assert!(text.contains("Reveal"));
        assert_eq!(s.progress().studied, 0);

        let (text, _) = execute(&mut s, Command::Key(StudyKey::Space));
        assert!(text.contains("[Back] Hola"));
        let (text, _) = execute(&mut s, Command::Mark(Outcome::Correct));
        assert!(text.contains("Card 2 of 2"));
        assert!(text.contains("[Front] Bye"));
    }

    #[test]
    fn completion_renders_summary_and_blocks_keys() {
        let mut s = session();
        for _ in 0..2 {
            execute(&mut s, Command::Key(StudyKey::Space));
            execute(&mut s, Command::Mark(Outcome::Correct));
        }
        let text = render(&s);
        assert!(text.contains("Study complete!"));
        assert!(text.contains("2 / 2  (100% correct)"));

        let (text, step) = execute(&mut s, Command::Key(StudyKey::ArrowLeft));
        assert!(text.starts_with("Session complete"));
        assert_eq!(step, Step::Continue);

        let (_, step) = execute(&mut s, Command::Leave(NavigationTarget::Dashboard));
        assert_eq!(step, Step::Exit(NavigationTarget::Dashboard));
    }

    #[test]
    fn outcome_mark_shows_on_revisit() {
        let mut s = session();
        execute(&mut s, Command::Key(StudyKey::Space));
        execute(&mut s, Command::Mark(Outcome::Incorrect));
        let (text, _) = execute(&mut s, Command::Key(StudyKey::ArrowLeft));
        assert!(text.contains("Card 1 of 2 ✗"));
    }

    #[test]
    fn card_view_offers_only_reachable_moves() {
        let mut s = session();
        let first = render_card(&s);
        assert!(first.contains("[→ next]"));
        assert!(!first.contains("previous"));

        execute(&mut s, Command::Key(StudyKey::ArrowRight));
        let last = render_card(&s);
        assert!(last.contains("[← previous]"));
        assert!(!last.contains("next]"));
    }

    #[test]
    fn help_lists_key_labels() {
        let text = help();
        assert!(text.contains("←      left"));
        assert!(text.contains("Space  (empty)"));
    }

    #[test]
    fn deck_list_flags_empty_decks() {
        let deck = |id: u64, name: &str| {
            Deck::new(DeckId::new(id), UserId::new("user_1").unwrap(), name, None, fixed_now())
                .unwrap()
        };
        let items = vec![
            DeckOverview {
                deck: deck(1, "Spanish"),
                card_count: 6,
            },
            DeckOverview {
                deck: deck(2, "Empty Deck"),
                card_count: 0,
            },
        ];
        let lines: Vec<String> = render_deck_list(&items).lines().map(str::to_owned).collect();
        assert!(lines[0].contains("  6 cards"));
        assert!(lines[1].contains("(empty)"));
        assert_eq!(render_deck_list(&[]), "No decks yet.");
    }
}
