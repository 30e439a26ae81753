//! Candidate move generation and the random move selector.
//!
//! Every piece except the pawn steps to one of its 8 neighbors. Pawns step
//! one square forward onto an empty cell and never capture. Destinations are
//! always active and never hold a piece of the mover's color.
//!
//! The selector picks uniformly among the candidates. There is no evaluation;
//! `compute_best_move` keeps its name as the hook for a future search.

use std::fmt;

use crate::board::{Board, Square, str_square};
use crate::piece::{Color, Piece, PieceKind};
use crate::rng::RandomSource;

/// A from/to pair of squares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", str_square(self.from), str_square(self.to))
    }
}

/// True if `piece` may land on `(row, col)`.
fn is_open_target(board: &Board, row: isize, col: isize, piece: &Piece) -> bool {
    match board.get_cell(row, col) {
        Some(cell) => cell.active && cell.piece.is_none_or(|p| p.color != piece.color),
        None => false,
    }
}

/// Candidate moves for `piece` standing at `(row, col)`.
pub fn get_piece_moves(board: &Board, (row, col): Square, piece: &Piece) -> Vec<Move> {
    let (r, c) = (row as isize, col as isize);
    let mut moves = Vec::new();

    if piece.kind == PieceKind::Pawn {
        let tr = r + piece.color.forward();
        if let Some(target) = board.get_cell(tr, c) {
            if target.active && target.piece.is_none() {
                moves.push(Move::new((row, col), (target.row, target.col)));
            }
        }
        return moves;
    }

    // King, Queen, Rook, Bishop and Knight all move one step in any direction.
    for d_row in -1..=1 {
        for d_col in -1..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let (tr, tc) = (r + d_row, c + d_col);
            if is_open_target(board, tr, tc, piece) {
                moves.push(Move::new((row, col), (tr as usize, tc as usize)));
            }
        }
    }
    moves
}

/// All candidate moves for `color`, scanning the board row-major.
pub fn generate_valid_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .cells()
        .filter(|cell| cell.active)
        .filter_map(|cell| cell.piece.filter(|p| p.color == color).map(|p| (cell, p)))
        .flat_map(|(cell, p)| get_piece_moves(board, (cell.row, cell.col), &p))
        .collect()
}

/// Pick a move for `color` uniformly at random, or `None` if it has no candidates.
pub fn compute_best_move<R: RandomSource>(board: &Board, color: Color, rng: &mut R) -> Option<Move> {
    let moves = generate_valid_moves(board, color);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.index(moves.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn place(board: &mut Board, sq: Square, kind: PieceKind, color: Color) {
        board.set_piece(sq, Some(Piece::new(kind, color)));
    }

    #[test]
    fn test_pawn_single_step() {
        let mut board = Board::new();
        place(&mut board, (4, 3), PieceKind::Pawn, Color::White);
        let p = board.piece_at((4, 3)).unwrap();
        let moves = get_piece_moves(&board, (4, 3), &p);
        assert_eq!(moves, vec![Move::new((4, 3), (3, 3))]);
    }

    #[test]
    fn test_pawn_blocked_and_no_capture() {
        let mut board = Board::new();
        place(&mut board, (3, 3), PieceKind::Pawn, Color::Black);
        place(&mut board, (4, 3), PieceKind::Knight, Color::White);
        place(&mut board, (4, 4), PieceKind::Bishop, Color::White);
        let p = board.piece_at((3, 3)).unwrap();
        // Forward is blocked and the diagonal enemy is not a capture target.
        assert!(get_piece_moves(&board, (3, 3), &p).is_empty());
    }

    #[test]
    fn test_pawn_into_inactive() {
        let mut board = Board::new();
        place(&mut board, (2, 3), PieceKind::Pawn, Color::White);
        let p = board.piece_at((2, 3)).unwrap();
        assert!(get_piece_moves(&board, (2, 3), &p).is_empty());
    }

    #[test]
    fn test_surrounded_pieces_have_eight_moves() {
        for kind in [
            PieceKind::King,
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            let mut board = Board::new();
            place(&mut board, (3, 3), kind, Color::White);
            place(&mut board, (2, 2), PieceKind::Rook, Color::Black);
            place(&mut board, (4, 4), PieceKind::Pawn, Color::Black);
            let p = board.piece_at((3, 3)).unwrap();
            let moves = get_piece_moves(&board, (3, 3), &p);
            assert_eq!(moves.len(), 8, "{kind:?}");
        }
    }

    #[test]
    fn test_excludes_inactive_and_own_pieces() {
        let mut board = Board::new();
        // Corner of the active region: five neighbors are inactive.
        place(&mut board, (2, 2), PieceKind::King, Color::Black);
        place(&mut board, (2, 3), PieceKind::Pawn, Color::Black);
        let p = board.piece_at((2, 2)).unwrap();
        let moves = get_piece_moves(&board, (2, 2), &p);
        assert_eq!(moves, vec![Move::new((2, 2), (3, 2)), Move::new((2, 2), (3, 3))]);
    }

    #[test]
    fn test_generate_valid_moves_filters_color() {
        let mut board = Board::new();
        place(&mut board, (4, 3), PieceKind::Pawn, Color::White);
        place(&mut board, (3, 4), PieceKind::Pawn, Color::Black);
        assert_eq!(generate_valid_moves(&board, Color::White), vec![Move::new((4, 3), (3, 3))]);
        assert_eq!(generate_valid_moves(&board, Color::Black), vec![Move::new((3, 4), (4, 4))]);
    }

    #[test]
    fn test_compute_best_move_none_without_candidates() {
        let mut board = Board::new();
        let mut rng = ScriptedSource::first();
        assert_eq!(compute_best_move(&board, Color::Black, &mut rng), None);

        // A black pawn at the bottom edge of the active region cannot advance.
        place(&mut board, (5, 2), PieceKind::Pawn, Color::Black);
        assert_eq!(compute_best_move(&board, Color::Black, &mut rng), None);
    }

    #[test]
    fn test_compute_best_move_uses_source() {
        let mut board = Board::new();
        place(&mut board, (3, 3), PieceKind::King, Color::Black);
        let all = generate_valid_moves(&board, Color::Black);
        let mut rng = ScriptedSource::new(vec![5]);
        assert_eq!(compute_best_move(&board, Color::Black, &mut rng), Some(all[5]));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::new((6, 4), (5, 4)).to_string(), "e2e3");
    }
}
