//! Expanding Chess command-line front end.
//!
//! ## Usage
//!
//! - `expanding-chess` - Play over the text protocol on stdin/stdout
//! - `expanding-chess play` - Same as above
//! - `expanding-chess demo` - Watch two random players

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expanding_chess::config::GameConfig;
use expanding_chess::constants::AI_REPLY_DELAY_MS;
use expanding_chess::game::Game;
use expanding_chess::protocol::ProtocolEngine;
use expanding_chess::rng::RandomSource;

/// Expanding Chess: a chess variant on a growing board
#[derive(Parser)]
#[command(name = "expanding-chess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for setup, expansion and AI choices
    #[arg(long, global = true, env = "EXPANDING_CHESS_SEED")]
    seed: Option<u64>,

    /// Delay before the computer replies, in milliseconds
    #[arg(long, global = true, env = "EXPANDING_CHESS_AI_DELAY_MS", default_value_t = AI_REPLY_DELAY_MS)]
    ai_delay_ms: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play as White over a line-based text protocol
    Play,
    /// Let a random White play against the computer
    Demo {
        /// Number of rounds to play
        #[arg(long, default_value_t = 10)]
        turns: usize,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only protocol responses.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "expanding_chess=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig::new(cli.seed, cli.ai_delay_ms);

    match cli.command {
        Some(Commands::Demo { turns }) => run_demo(&config, turns),
        Some(Commands::Play) | None => {
            tracing::info!(
                "expanding-chess v{} ready, seed {:?}",
                env!("CARGO_PKG_VERSION"),
                config.seed
            );
            let mut engine = ProtocolEngine::new(config);
            engine.run_stdio().context("protocol loop failed")
        }
    }
}

fn run_demo(config: &GameConfig, turns: usize) -> Result<()> {
    let mut game = Game::new(config.rng());
    // White draws from a forked stream so the game's own draws are unaffected.
    let mut white_rng = config.rng().fork();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Expanding Chess demo\n")?;
    writeln!(out, "{}", game.board())?;

    for round in 1..=turns {
        let moves = game.player_moves();
        if moves.is_empty() {
            writeln!(out, "White has no moves, stopping.")?;
            break;
        }
        let mv = moves[white_rng.index(moves.len())];
        game.process_player_move(
            mv.from.0 as isize,
            mv.from.1 as isize,
            mv.to.0 as isize,
            mv.to.1 as isize,
        )
        .with_context(|| format!("generated move {mv} was rejected"))?;
        let reply = match game.run_pending_ai_reply().flatten() {
            Some(r) => r.to_string(),
            None => "pass".to_string(),
        };
        writeln!(
            out,
            "{round}. {mv} {reply}  (stage {}, {} active)",
            game.board().stage_index(),
            game.board().active_count()
        )?;
    }

    writeln!(out, "\n{}", game.board())?;
    Ok(())
}
