//! Line-oriented text protocol for playing a game.
//!
//! The framing follows the Go Text Protocol: each request is one line with
//! an optional numeric id, each response starts with `=` (success) or `?`
//! (failure) followed by the id and a message, and ends with a blank line.
//! Lines starting with `#` are ignored.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `new_game [seed]` - Start over, optionally with a new seed
//! - `move <from> <to>` - Play White's move, answer with Black's reply
//! - `undo` - Take back the last two moves
//! - `showboard` - Render the board
//! - `turn` - Side to move
//! - `moves` - Candidate moves for the side to move
//! - `history` - Moves applied so far
//!
//! ## Example
//!
//! ```ignore
//! use expanding_chess::{config::GameConfig, protocol::ProtocolEngine};
//! let mut engine = ProtocolEngine::new(GameConfig::default());
//! engine.run_stdio()?;
//! ```

use std::io::{self, BufRead, Write};
use std::thread;

use tracing::{debug, info};

use crate::board::parse_square;
use crate::config::GameConfig;
use crate::game::Game;
use crate::movegen::{Move, generate_valid_moves};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "history",
    "known_command",
    "list_commands",
    "move",
    "moves",
    "name",
    "new_game",
    "quit",
    "showboard",
    "turn",
    "undo",
    "version",
];

/// Protocol session state.
pub struct ProtocolEngine {
    /// Current game
    game: Game,
    /// Seed and reply delay
    config: GameConfig,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl ProtocolEngine {
    pub fn new(config: GameConfig) -> Self {
        let game = Game::new(config.rng());
        Self { game, config }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run_stdio(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, mut output: O) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Wait out the reply delay and let the AI move, if a reply is pending.
    fn flush_ai_reply(&mut self) -> Option<String> {
        if !self.game.ai_reply_pending() {
            return None;
        }
        if !self.config.ai_delay.is_zero() {
            thread::sleep(self.config.ai_delay);
        }
        let reply = self.game.run_pending_ai_reply()?;
        Some(reply.map_or_else(|| "pass".to_string(), |mv| mv.to_string()))
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "executing command");
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "new_game" => {
                if let Some(arg) = args.first() {
                    match arg.parse::<u64>() {
                        Ok(seed) => self.config.seed = Some(seed),
                        Err(_) => return (false, "invalid seed".to_string()),
                    }
                }
                self.game = Game::new(self.config.rng());
                info!(seed = ?self.config.seed, "started new game");
                (true, String::new())
            }

            "move" => {
                if args.len() < 2 {
                    return (false, "missing argument".to_string());
                }
                let (Some(from), Some(to)) = (parse_square(args[0]), parse_square(args[1])) else {
                    return (false, "invalid coordinate".to_string());
                };
                let result = self.game.process_player_move(
                    from.0 as isize,
                    from.1 as isize,
                    to.0 as isize,
                    to.1 as isize,
                );
                match result {
                    Ok(()) => (true, self.flush_ai_reply().unwrap_or_default()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "undo" => match self.game.undo_last_moves() {
                Ok(()) => (true, self.flush_ai_reply().unwrap_or_default()),
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board())),

            "turn" => (true, self.game.turn().to_string()),

            "moves" => {
                let moves = generate_valid_moves(self.game.board(), self.game.turn());
                (true, join_moves(moves.iter().copied()))
            }

            "history" => (
                true,
                join_moves(self.game.history().iter().map(|r| r.as_move())),
            ),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

fn join_moves(moves: impl Iterator<Item = Move>) -> String {
    moves.map(|m| m.to_string()).collect::<Vec<_>>().join(" ")
}
