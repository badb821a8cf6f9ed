use anyhow::{Context, Result};
use clap::Parser;
use matchpairs_core as game;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use web_time::Instant;

mod command;
mod render;
mod store;

use command::Command;
use store::JsonFileStore;

/// How long to wait for input when nothing is scheduled.
const IDLE_WAIT_MS: u64 = 1_000;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// File holding best scores
    #[arg(long, default_value = "matchpairs-best.json")]
    store: PathBuf,

    /// TOML file overriding mode and timing
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<game::GameConfig> {
    let Some(path) = path else {
        return Ok(game::GameConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("Could not parse config {}", path.display()))?;
    Ok(config)
}

fn open_store(path: &Path) -> JsonFileStore {
    JsonFileStore::open(path).unwrap_or_else(|err| {
        log::warn!("Starting without saved bests: {:#}", err);
        JsonFileStore::empty(path)
    })
}

fn spawn_input() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(Command::parse(&line)).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let store = open_store(&args.store);
    log::debug!("best scores in {}", store.path().display());
    let mut game = game::GameController::new(config, store, seed)?;

    let epoch = Instant::now();
    let now = || -> game::Millis { epoch.elapsed().as_millis().try_into().unwrap_or(u64::MAX) };
    let input = spawn_input();
    let mut shown: Option<game::Snapshot> = None;

    loop {
        game.advance_to(now());
        let snapshot = game.snapshot();
        if shown.as_ref() != Some(&snapshot) {
            println!("{}", render::board(&snapshot));
            shown = Some(snapshot.clone());
        }

        let wait = game
            .next_deadline()
            .map_or(IDLE_WAIT_MS, |deadline| deadline.saturating_sub(now()));

        match input.recv_timeout(Duration::from_millis(wait)) {
            Ok(Command::Play) => game.start_round(now())?,
            Ok(Command::Flip(number)) => {
                let Some(card) = number.checked_sub(1).and_then(|i| snapshot.cards.get(i)) else {
                    println!("No card {}", number);
                    continue;
                };
                let outcome = game.flip(card.id, now());
                log::debug!("flip {} ({}): {:?}", number, card.id, outcome);
            }
            Ok(Command::Help) => println!("{}", render::HELP),
            Ok(Command::Unknown(line)) => println!("Unknown command {:?}\n{}", line, render::HELP),
            Ok(Command::Quit) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    Ok(())
}
