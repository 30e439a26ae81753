//! The 8x8 grid with its growing active region.
//!
//! Cells outside the active region exist but are not playable. Each call to
//! [`Board::expand_board`] activates at most one cell inside the next
//! expansion stage, and the stage index advances once the active region's
//! bounds reach that stage's rectangle.

use std::fmt;

use tracing::{info, trace};

use crate::constants::{BOARD_SIZE, EXPANSION_STAGES, FINAL_STAGE, NUM_CELLS};
use crate::piece::Piece;
use crate::rng::RandomSource;

/// A `(row, col)` pair. Row 0 is Black's side.
pub type Square = (usize, usize);

/// Inclusive rectangle of rows and columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl Region {
    pub const fn new(min_row: usize, max_row: usize, min_col: usize, max_col: usize) -> Self {
        Self {
            min_row,
            max_row,
            min_col,
            max_col,
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }

    /// True if `other` lies entirely inside this rectangle.
    pub fn contains_region(&self, other: &Region) -> bool {
        self.min_row <= other.min_row
            && self.max_row >= other.max_row
            && self.min_col <= other.min_col
            && self.max_col >= other.max_col
    }

    /// Grow the bounds to include `(row, col)`.
    fn include(&mut self, row: usize, col: usize) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }
}

/// One square of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub active: bool,
    pub piece: Option<Piece>,
}

#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>,
    active_region: Region,
    stage_index: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board whose active cells are exactly the first stage.
    pub fn new() -> Self {
        let initial = EXPANSION_STAGES[0];
        let mut cells = Vec::with_capacity(NUM_CELLS);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                cells.push(Cell {
                    row,
                    col,
                    active: initial.contains(row, col),
                    piece: None,
                });
            }
        }
        Self {
            cells,
            active_region: initial,
            stage_index: 0,
        }
    }

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_SIZE + col
    }

    fn in_bounds(row: isize, col: isize) -> Option<Square> {
        let size = BOARD_SIZE as isize;
        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }
        Some((row as usize, col as usize))
    }

    /// Look up a cell; `None` when the coordinates fall off the grid.
    pub fn get_cell(&self, row: isize, col: isize) -> Option<&Cell> {
        let (r, c) = Self::in_bounds(row, col)?;
        Some(&self.cells[Self::idx(r, c)])
    }

    /// Piece at an in-bounds square.
    pub fn piece_at(&self, (row, col): Square) -> Option<Piece> {
        self.cells[Self::idx(row, col)].piece
    }

    /// Overwrite the piece at an in-bounds square.
    pub fn set_piece(&mut self, (row, col): Square, piece: Option<Piece>) {
        self.cells[Self::idx(row, col)].piece = piece;
    }

    /// All 64 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn active_region(&self) -> Region {
        self.active_region
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn expansion_stages(&self) -> &'static [Region] {
        &EXPANSION_STAGES
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.active).count()
    }

    /// Activate one random inactive cell of the next stage.
    ///
    /// Performs at most one activation and at most one stage advance. Once
    /// the final stage is reached this does nothing.
    pub fn expand_board<R: RandomSource>(&mut self, rng: &mut R) {
        if self.stage_index >= FINAL_STAGE {
            return;
        }
        let next = EXPANSION_STAGES[self.stage_index + 1];

        let candidates: Vec<usize> = (next.min_row..=next.max_row)
            .flat_map(|row| (next.min_col..=next.max_col).map(move |col| Self::idx(row, col)))
            .filter(|&i| !self.cells[i].active)
            .collect();

        if !candidates.is_empty() {
            let i = candidates[rng.index(candidates.len())];
            let cell = &mut self.cells[i];
            cell.active = true;
            let (row, col) = (cell.row, cell.col);
            self.active_region.include(row, col);
            trace!(row, col, remaining = candidates.len() - 1, "activated cell");
        }

        if self.active_region == next {
            self.stage_index += 1;
            info!(stage = self.stage_index, "board reached next expansion stage");
        }
    }
}

/// Parse algebraic notation (`"e2"`) into a square.
///
/// Files `a`..`h` map to columns 0..7 and ranks `8`..`1` to rows 0..7.
/// Returns `None` for anything else.
pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    if !(b'a'..b'a' + BOARD_SIZE as u8).contains(&file) || !(b'1'..b'1' + BOARD_SIZE as u8).contains(&rank)
    {
        return None;
    }
    let col = (file - b'a') as usize;
    let row = BOARD_SIZE - 1 - (rank - b'1') as usize;
    Some((row, col))
}

/// Format a square in algebraic notation.
pub fn str_square((row, col): Square) -> String {
    format!("{}{}", (b'a' + col as u8) as char, BOARD_SIZE - row)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - row)?;
            for col in 0..BOARD_SIZE {
                let cell = &self.cells[Self::idx(row, col)];
                match (cell.active, cell.piece) {
                    (_, Some(p)) => write!(f, "{} ", p.symbol())?,
                    (true, None) => write!(f, ". ")?,
                    (false, None) => write!(f, "# ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{} ", (b'a' + col as u8) as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    #[test]
    fn test_initial_region() {
        let board = Board::new();
        assert_eq!(board.active_count(), 16);
        assert_eq!(board.stage_index(), 0);
        assert_eq!(board.active_region(), Region::new(2, 5, 2, 5));
        assert_eq!(board.expansion_stages()[0], board.active_region());
        assert!(board.get_cell(2, 2).unwrap().active);
        assert!(!board.get_cell(1, 2).unwrap().active);
    }

    #[test]
    fn test_get_cell_bounds() {
        let board = Board::new();
        assert!(board.get_cell(-1, 0).is_none());
        assert!(board.get_cell(0, 8).is_none());
        assert!(board.get_cell(8, 8).is_none());
        let c = board.get_cell(7, 3).unwrap();
        assert_eq!((c.row, c.col), (7, 3));
    }

    #[test]
    fn test_cells_row_major() {
        let board = Board::new();
        let coords: Vec<Square> = board.cells().map(|c| (c.row, c.col)).collect();
        assert_eq!(coords.len(), 64);
        assert_eq!(coords[0], (0, 0));
        assert_eq!(coords[9], (1, 1));
        assert_eq!(coords[63], (7, 7));
    }

    #[test]
    fn test_expand_first_candidate() {
        // First inactive cell of the 6x6 ring in row-major order is (1, 1).
        let mut board = Board::new();
        let mut rng = ScriptedSource::first();
        board.expand_board(&mut rng);
        assert!(board.get_cell(1, 1).unwrap().active);
        assert_eq!(board.active_count(), 17);
        assert_eq!(board.active_region(), Region::new(1, 5, 1, 5));
        assert_eq!(board.stage_index(), 0);
    }

    #[test]
    fn test_stage_advances_when_bounds_match() {
        // Activating (1,1) then the last ring cell (6,6) spans the 6x6 bounds
        // before the ring is filled in.
        let mut board = Board::new();
        let mut rng = ScriptedSource::new(vec![0, 18]);
        board.expand_board(&mut rng);
        assert_eq!(board.stage_index(), 0);
        // 19 candidates remain and index 18 is (6, 6).
        board.expand_board(&mut rng);
        assert!(board.get_cell(6, 6).unwrap().active);
        assert_eq!(board.stage_index(), 1);
        assert_eq!(board.active_count(), 18);
    }

    #[test]
    fn test_expand_is_monotonic() {
        let mut board = Board::new();
        let mut rng = fastrand::Rng::with_seed(42);
        let mut prev_region = board.active_region();
        let mut prev_count = board.active_count();
        for _ in 0..60 {
            board.expand_board(&mut rng);
            let region = board.active_region();
            assert!(region.contains_region(&prev_region));
            assert!(board.active_count() >= prev_count);
            prev_region = region;
            prev_count = board.active_count();
        }
    }

    #[test]
    fn test_final_stage_then_noop() {
        // The final stage is reached once the bounds span the full board,
        // usually long before every cell is active.
        let mut board = Board::new();
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..100 {
            board.expand_board(&mut rng);
        }
        assert_eq!(board.stage_index(), FINAL_STAGE);
        assert_eq!(board.active_region(), EXPANSION_STAGES[FINAL_STAGE]);

        let active = board.active_count();
        let layout: Vec<bool> = board.cells().map(|c| c.active).collect();
        for _ in 0..10 {
            board.expand_board(&mut rng);
        }
        assert_eq!(board.active_count(), active);
        assert_eq!(board.cells().map(|c| c.active).collect::<Vec<_>>(), layout);
        assert_eq!(board.stage_index(), FINAL_STAGE);
    }

    #[test]
    fn test_square_notation() {
        assert_eq!(parse_square("a8"), Some((0, 0)));
        assert_eq!(parse_square("H1"), Some((7, 7)));
        assert_eq!(parse_square("e2"), Some((6, 4)));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a"), None);
        assert_eq!(str_square((6, 4)), "e2");
        assert_eq!(str_square((0, 7)), "h8");
    }

    #[test]
    fn test_display_marks_inactive() {
        let board = Board::new();
        let text = board.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8 # # # # # # # # ");
        let fourth = text.lines().nth(3).unwrap();
        assert_eq!(fourth, "5 # # . . . . # # ");
    }
}
