//! Expanding Chess: a chess variant on a board that grows every turn.
//!
//! Play starts on the central 4x4 block of an 8x8 grid. After every move one
//! random cell of the next stage (6x6, then the full board) becomes active.
//! Each side gets a four-wide back rank with a king and random officers, plus
//! four pawns. The computer plays Black by picking a random candidate move.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, expansion stages, setup parameters
//! - [`piece`] - Piece kinds, colors, glyphs
//! - [`board`] - Grid, active region, expansion
//! - [`movegen`] - Candidate moves and the random move selector
//! - [`game`] - Setup, player and AI moves, undo
//! - [`rng`] - Injectable random sources
//! - [`config`] - Seed and reply delay
//! - [`protocol`] - Text command loop
//!
//! ## Example
//!
//! ```
//! use expanding_chess::game::Game;
//!
//! let mut game = Game::with_seed(7);
//!
//! // White pawn on e4 takes the black pawn on e5
//! game.process_player_move(4, 4, 3, 4).unwrap();
//! let reply = game.run_pending_ai_reply();
//! println!("Black answered {:?}", reply);
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod piece;
pub mod protocol;
pub mod rng;
