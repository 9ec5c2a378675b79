//! Draughts-Rust: English draughts on the terminal.
//!
//! ## Usage
//!
//! - `draughts-rust` - Play interactively on stdin
//! - `draughts-rust play [SCRIPT] [RECORD]` - Replay a script and/or record moves
//! - `draughts-rust demo` - Watch a random self-play game

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use draughts_rust::board::{Board, Player};
use draughts_rust::constants::{DEMO_SEED, MAX_PLIES, REPLAY_DELAY_MS};
use draughts_rust::driver::{Driver, DriverOptions, MoveLog};
use draughts_rust::playout::playout_with;

/// Draughts-Rust: an English draughts rules engine
#[derive(Parser)]
#[command(name = "draughts-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game from the terminal or from a script of moves
    Play(PlayArgs),
    /// Play a random self-play game and print it
    Demo {
        /// Seed for move selection
        #[arg(long, default_value_t = DEMO_SEED)]
        seed: u64,
        /// Stop after this many moves
        #[arg(long, default_value_t = MAX_PLIES)]
        max_plies: usize,
    },
}

#[derive(Args, Default)]
struct PlayArgs {
    /// File with one move per line (e.g. "B3 to A4"); stdin if omitted
    script: Option<PathBuf>,
    /// File to record played moves to
    record: Option<PathBuf>,
    /// Pause between scripted moves, in milliseconds
    #[arg(long, default_value_t = REPLAY_DELAY_MS)]
    delay_ms: u64,
    /// Draw the board without colours
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_play(args),
        Some(Commands::Demo { seed, max_plies }) => {
            run_demo(seed, max_plies);
            Ok(())
        }
        None => run_play(PlayArgs {
            delay_ms: REPLAY_DELAY_MS,
            ..PlayArgs::default()
        }),
    }
}

fn run_play(args: PlayArgs) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }
    let options = DriverOptions {
        interactive: args.script.is_none(),
        delay: Duration::from_millis(args.delay_ms),
        clear_screen: true,
        color: !args.no_color,
    };

    let input: Box<dyn io::BufRead> = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut driver = Driver::new(input, io::stdout().lock(), options);
    match &args.record {
        Some(path) => driver.with_log(MoveLog::create(path)?).run()?,
        None => driver.run()?,
    };
    Ok(())
}

fn run_demo(seed: u64, max_plies: usize) {
    println!("Draughts-Rust: random self-play (seed {seed})\n");

    let mut board = Board::new();
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut ply = 0;
    let victor = playout_with(&mut board, &mut rng, max_plies, |_, mv| {
        ply += 1;
        println!("{ply:>3}. {mv}");
    });

    println!("\n{board}");
    match victor {
        Some(Player::Black) => println!("Black wins!"),
        Some(Player::White) => println!("Red wins!"),
        None => println!("No winner after {max_plies} moves."),
    }
}
