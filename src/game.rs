//! Game orchestration: setup, player moves, AI replies, and undo.
//!
//! The human always plays White. A successful player move schedules a single
//! AI reply, which the front end runs after its configured delay through
//! [`Game::run_pending_ai_reply`]. Undo restores pieces only; cells activated
//! by expansion stay active.

use tracing::debug;

use crate::board::{Board, Square};
use crate::constants::{BACK_RANK_OPTIONS, RANK_WIDTH};
use crate::movegen::{Move, compute_best_move};
use crate::piece::{Color, Piece, PieceKind};
use crate::rng::RandomSource;

/// Why a request left the game unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Source or destination is off the board
    OutOfBounds,
    /// Destination cell is not active yet
    InactiveDestination,
    /// Source cell holds no piece
    EmptySource,
    /// Source piece belongs to the computer
    NotYourPiece,
    /// Destination holds one of the mover's own pieces
    SelfCapture,
    /// Fewer than two moves recorded
    NothingToUndo,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "illegal move: off the board"),
            MoveError::InactiveDestination => write!(f, "illegal move: destination not active"),
            MoveError::EmptySource => write!(f, "illegal move: no piece on source"),
            MoveError::NotYourPiece => write!(f, "illegal move: not your piece"),
            MoveError::SelfCapture => write!(f, "illegal move: destination holds own piece"),
            MoveError::NothingToUndo => write!(f, "nothing to undo"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Contents of one endpoint cell before a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellSnapshot {
    pub square: Square,
    pub piece: Option<Piece>,
}

/// Enough information to reverse one applied move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: CellSnapshot,
    pub to: CellSnapshot,
}

impl MoveRecord {
    pub fn as_move(&self) -> Move {
        Move::new(self.from.square, self.to.square)
    }
}

pub struct Game<R: RandomSource = fastrand::Rng> {
    board: Board,
    history: Vec<MoveRecord>,
    turn: Color,
    ai_reply_pending: bool,
    rng: R,
}

impl Game<fastrand::Rng> {
    /// New game seeded from the given value.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed))
    }
}

impl Default for Game<fastrand::Rng> {
    fn default() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl<R: RandomSource> Game<R> {
    /// Fresh board with pieces placed, White to move.
    pub fn new(rng: R) -> Self {
        let mut game = Self {
            board: Board::new(),
            history: Vec::new(),
            turn: Color::White,
            ai_reply_pending: false,
            rng,
        };
        game.init_pieces();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn ai_reply_pending(&self) -> bool {
        self.ai_reply_pending
    }

    /// Place a four-wide back rank and pawn row for each side.
    ///
    /// The king sits in one of the two middle slots; other back-rank slots
    /// are drawn independently from Q, R, B, N.
    pub fn init_pieces(&mut self) {
        let ar = self.board.active_region();
        let columns: [usize; RANK_WIDTH] = [ar.min_col, ar.min_col + 1, ar.min_col + 2, ar.max_col];

        for (color, back_row, pawn_row) in [
            (Color::White, ar.max_row, ar.max_row - 1),
            (Color::Black, ar.min_row, ar.min_row + 1),
        ] {
            let king_slot = self.rng.index(2) + 1;
            for (slot, &col) in columns.iter().enumerate() {
                let kind = if slot == king_slot {
                    PieceKind::King
                } else {
                    BACK_RANK_OPTIONS[self.rng.index(BACK_RANK_OPTIONS.len())]
                };
                self.board.set_piece((back_row, col), Some(Piece::new(kind, color)));
            }
            for &col in &columns {
                self.board
                    .set_piece((pawn_row, col), Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
    }

    /// Apply a move for White.
    ///
    /// Only the destination is checked: it must be active and must not hold a
    /// white piece. Distance and piece type are not restricted. On success the
    /// board expands by one step, Black is to move and an AI reply is pending.
    pub fn process_player_move(
        &mut self,
        from_row: isize,
        from_col: isize,
        to_row: isize,
        to_col: isize,
    ) -> Result<(), MoveError> {
        let (Some(from), Some(to)) = (
            self.board.get_cell(from_row, from_col),
            self.board.get_cell(to_row, to_col),
        ) else {
            debug!(from_row, from_col, to_row, to_col, "rejected: off the board");
            return Err(MoveError::OutOfBounds);
        };
        if !to.active {
            debug!(to_row, to_col, "rejected: destination inactive");
            return Err(MoveError::InactiveDestination);
        }
        match from.piece {
            None => return Err(MoveError::EmptySource),
            Some(p) if p.color != Color::White => return Err(MoveError::NotYourPiece),
            Some(_) => {}
        }
        if to.piece.is_some_and(|p| p.color == Color::White) {
            return Err(MoveError::SelfCapture);
        }

        let mv = Move::new((from.row, from.col), (to.row, to.col));
        self.apply_move(mv);
        self.board.expand_board(&mut self.rng);
        self.turn = Color::Black;
        self.schedule_ai_reply();
        Ok(())
    }

    /// Every `(from, to)` pair [`Game::process_player_move`] would accept.
    ///
    /// Sources are White's pieces and destinations are active cells without a
    /// white piece, in row-major order.
    pub fn player_moves(&self) -> Vec<Move> {
        let is_white = |p: Option<Piece>| p.is_some_and(|p| p.color == Color::White);
        let targets: Vec<Square> = self
            .board
            .cells()
            .filter(|c| c.active && !is_white(c.piece))
            .map(|c| (c.row, c.col))
            .collect();
        self.board
            .cells()
            .filter(|c| is_white(c.piece))
            .flat_map(|c| targets.iter().map(move |&to| Move::new((c.row, c.col), to)))
            .collect()
    }

    /// Let the computer move for Black, then expand and hand the turn back.
    ///
    /// Returns the applied move, or `None` when Black had no candidate and
    /// passed. Expansion happens in both cases.
    pub fn process_ai_move(&mut self) -> Option<Move> {
        let mv = compute_best_move(&self.board, Color::Black, &mut self.rng);
        match mv {
            Some(mv) => self.apply_move(mv),
            None => debug!("black has no candidate move, passing"),
        }
        self.board.expand_board(&mut self.rng);
        self.turn = Color::White;
        mv
    }

    /// Run the scheduled AI reply, if any.
    ///
    /// Returns `None` when nothing was pending, otherwise the result of
    /// [`Game::process_ai_move`].
    pub fn run_pending_ai_reply(&mut self) -> Option<Option<Move>> {
        if !self.ai_reply_pending {
            return None;
        }
        self.ai_reply_pending = false;
        Some(self.process_ai_move())
    }

    /// Revert the last two recorded moves (AI first, then player).
    ///
    /// Pieces are restored from their snapshots; the active region and stage
    /// are left as they are. If it is White's turn afterwards, the turn goes
    /// to Black and a new AI reply is scheduled.
    pub fn undo_last_moves(&mut self) -> Result<(), MoveError> {
        if self.history.len() < 2 {
            return Err(MoveError::NothingToUndo);
        }
        for _ in 0..2 {
            if let Some(record) = self.history.pop() {
                self.board.set_piece(record.from.square, record.from.piece);
                self.board.set_piece(record.to.square, record.to.piece);
                debug!(mv = %record.as_move(), "undid move");
            }
        }
        if self.turn == Color::White {
            self.turn = Color::Black;
            self.schedule_ai_reply();
        }
        Ok(())
    }

    /// Record both endpoints, then move the piece (capturing whatever is there).
    fn apply_move(&mut self, mv: Move) {
        let record = MoveRecord {
            from: CellSnapshot {
                square: mv.from,
                piece: self.board.piece_at(mv.from),
            },
            to: CellSnapshot {
                square: mv.to,
                piece: self.board.piece_at(mv.to),
            },
        };
        self.history.push(record);
        self.board.set_piece(mv.to, record.from.piece);
        self.board.set_piece(mv.from, None);
        debug!(%mv, captured = record.to.piece.is_some(), "applied move");
    }

    fn schedule_ai_reply(&mut self) {
        self.ai_reply_pending = true;
    }

    /// Put a piece on a square directly, bypassing move validation.
    ///
    /// Used to build custom positions; does not touch history or turn.
    pub fn place_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.board.set_piece(sq, piece);
    }
}
