//! Board geometry, expansion stages, and setup parameters.
//!
//! The grid is always 8x8. Only the cells inside the active region are
//! playable, and the region grows toward the stage rectangles listed here.

use crate::board::Region;
use crate::piece::PieceKind;

// =============================================================================
// Board Geometry
// =============================================================================

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// Total number of cells.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

// =============================================================================
// Expansion Stages
// =============================================================================

/// Nested target rectangles: 4x4, then 6x6, then the full board.
///
/// Stage 0 is the initial active region.
pub const EXPANSION_STAGES: [Region; 3] = [
    Region::new(2, 5, 2, 5),
    Region::new(1, 6, 1, 6),
    Region::new(0, 7, 0, 7),
];

/// Index of the last (full-board) stage.
pub const FINAL_STAGE: usize = EXPANSION_STAGES.len() - 1;

// =============================================================================
// Setup
// =============================================================================

/// Pieces a non-king back-rank slot is drawn from (with replacement).
pub const BACK_RANK_OPTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Number of pieces in a back rank (and in a pawn row).
pub const RANK_WIDTH: usize = 4;

// =============================================================================
// Timing
// =============================================================================

/// Default wait before the AI reply runs, in milliseconds.
pub const AI_REPLY_DELAY_MS: u64 = 500;
