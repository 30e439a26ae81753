//! Piece kinds, colors, and their display glyphs.

use std::fmt;

/// Side to move / owner of a piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row delta of a pawn step. White advances toward row 0.
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// A piece on the board. Never changes after setup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Unicode chess glyph for rendering.
    pub fn symbol(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::King, Color::White) => "♔",
            (PieceKind::Queen, Color::White) => "♕",
            (PieceKind::Rook, Color::White) => "♖",
            (PieceKind::Bishop, Color::White) => "♗",
            (PieceKind::Knight, Color::White) => "♘",
            (PieceKind::Pawn, Color::White) => "♙",
            (PieceKind::King, Color::Black) => "♚",
            (PieceKind::Queen, Color::Black) => "♛",
            (PieceKind::Rook, Color::Black) => "♜",
            (PieceKind::Bishop, Color::Black) => "♝",
            (PieceKind::Knight, Color::Black) => "♞",
            (PieceKind::Pawn, Color::Black) => "♟",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
