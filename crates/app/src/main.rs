use std::fmt;
use std::io;
use std::path::PathBuf;

use services::{DeckService, StudyService};
use storage::repository::Storage;
use storage::seed::SeedCatalog;
use study_core::Clock;
use study_core::model::{DeckId, UserId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::Step;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDeckId { raw: String },
    InvalidUserId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDeckId { raw } => write!(f, "invalid --deck-id value: {raw}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- study [--decks <path>] [--user <id>] [--deck-id <id>]");
    eprintln!("  cargo run -p app -- decks [--decks <path>] [--user <id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --decks demos/decks.json");
    eprintln!("  --user local-user");
    eprintln!("  --deck-id 1");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_DECKS_FILE, STUDY_USER_ID, STUDY_DECK_ID, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Study,
    Decks,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "study" => Some(Self::Study),
            "decks" => Some(Self::Decks),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    decks_file: PathBuf,
    user: UserId,
    deck_id: DeckId,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut decks_file = std::env::var("STUDY_DECKS_FILE")
            .map_or_else(|_| PathBuf::from("demos/decks.json"), PathBuf::from);
        let mut user_raw =
            std::env::var("STUDY_USER_ID").unwrap_or_else(|_| "local-user".to_owned());
        let mut deck_id = std::env::var("STUDY_DECK_ID")
            .ok()
            .and_then(|value| value.parse::<DeckId>().ok())
            .unwrap_or_else(|| DeckId::new(1));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--decks" => {
                    decks_file = PathBuf::from(require_value(args, "--decks")?);
                }
                "--user" => {
                    user_raw = require_value(args, "--user")?;
                }
                "--deck-id" => {
                    let value = require_value(args, "--deck-id")?;
                    deck_id = value
                        .parse::<DeckId>()
                        .map_err(|_| ArgsError::InvalidDeckId { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let user = UserId::new(user_raw.clone())
            .map_err(|_| ArgsError::InvalidUserId { raw: user_raw })?;

        Ok(Self {
            decks_file,
            user,
            deck_id,
        })
    }
}

fn init_logging() {
    // stdout belongs to the study view.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn load_storage(args: &Args) -> Result<Storage, Box<dyn std::error::Error>> {
    let storage = Storage::in_memory();
    let catalog = SeedCatalog::from_path(&args.decks_file)?;
    let mut clock = Clock::default_clock();
    let report = catalog
        .import(
            &args.user,
            &mut clock,
            storage.decks.as_ref(),
            storage.cards.as_ref(),
        )
        .await?;
    info!(
        file = %args.decks_file.display(),
        decks = report.deck_ids.len(),
        cards = report.cards,
        "deck catalogue loaded"
    );
    Ok(storage)
}

async fn run_decks(storage: &Storage, user: &UserId) -> Result<(), Box<dyn std::error::Error>> {
    let items = DeckService::from_storage(storage).list_decks(user).await?;
    println!("{}", terminal::render_deck_list(&items));
    Ok(())
}

async fn run_study(
    storage: &Storage,
    user: &UserId,
    deck_id: DeckId,
) -> Result<(), Box<dyn std::error::Error>> {
    let launch = StudyService::from_storage(storage).open(user, deck_id).await?;
    if launch.is_empty() {
        println!(
            "{}",
            terminal::render_empty(launch.deck().name(), launch.back_to_deck())
        );
        return Ok(());
    }
    let Some(mut session) = launch.into_session() else {
        return Ok(());
    };

    println!("Study: {}", session.deck().name());
    if let Some(description) = session.deck().description() {
        println!("{description}");
    }
    println!("{}\n", terminal::help());
    println!("{}", terminal::render(&session));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = terminal::parse_command(&line, &session);
        debug!(?command, "input");
        let (text, step) = terminal::execute(&mut session, command);
        println!("{text}");
        if let Step::Exit(target) = step {
            info!(%target, "leaving study session");
            break;
        }
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: studying when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Study,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Study,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_logging();
    let storage = load_storage(&parsed).await?;

    match cmd {
        Command::Study => run_study(&storage, &parsed.user, parsed.deck_id).await,
        Command::Decks => run_decks(&storage, &parsed.user).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
