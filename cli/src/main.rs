use std::io::{self, BufRead, Write};

use clap::Parser;
use sapper_core::{Difficulty, GameConfig, GameSession, RevealOutcome};

use crate::command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Skip the menu and start with a preset
    #[arg(short, long, conflicts_with = "size")]
    difficulty: Option<Difficulty>,

    /// Side of a custom square board
    #[arg(long, requires = "mines")]
    size: Option<u8>,

    /// Mine count of a custom board
    #[arg(long, requires = "size")]
    mines: Option<u16>,

    /// Force a seed instead of random, applies to every game of this run
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn initial_config(&self) -> anyhow::Result<Option<GameConfig>> {
        if let (Some(size), Some(mines)) = (self.size, self.mines) {
            return Ok(Some(GameConfig::new(size, mines)?));
        }
        Ok(self.difficulty.map(Difficulty::config))
    }

    fn next_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("args: {:?}", args);

    let mut session = GameSession::new();
    if let Some(config) = args.initial_config()? {
        session.start(config, args.next_seed());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut screen = String::new();

    println!("Welcome to Minesweeper! Type help for commands.");
    loop {
        screen.clear();
        render::session(&mut screen, &session)?;
        print!("{}>> ", screen);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("error: {:#}", err);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Reset => session.reset(),
            Command::Start(config) => {
                if session.grid().is_some() {
                    eprintln!("error: a game is running, type restart or menu first");
                    continue;
                }
                session.start(config, args.next_seed());
            }
            Command::Reveal(coords) => {
                if session.reveal(coords) == RevealOutcome::NoChange {
                    log::info!("Nothing to reveal at {:?}", coords);
                }
            }
            Command::Flag(coords) => {
                if !session.toggle_flag(coords).has_update() {
                    log::info!("Cannot flag {:?}", coords);
                }
            }
        }
    }

    Ok(())
}
