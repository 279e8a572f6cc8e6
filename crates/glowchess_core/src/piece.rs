//! Piece and side types.

use serde::{Deserialize, Serialize};

/// The two sides in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// White (moves first, advances toward row 0).
    White,
    /// Black (advances toward row 7).
    Black,
}

impl Color {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta a pawn of this color advances by.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row a pawn of this color starts on (enables the two-square push).
    pub fn pawn_home_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Opponent's back rank, where a pawn of this color promotes.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// King: one step in any direction.
    King,
    /// Queen: slides along ranks, files, and diagonals.
    Queen,
    /// Rook: slides along ranks and files.
    Rook,
    /// Bishop: slides along diagonals.
    Bishop,
    /// Knight: fixed L-shaped jumps.
    Knight,
    /// Pawn: forward pushes, diagonal captures, en passant.
    Pawn,
}

impl PieceKind {
    /// Single-letter label used in logs and the ASCII board dump.
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A piece on the board: a side and a kind, nothing more.
///
/// Pieces have no identity beyond `(color, kind)` and the square that
/// holds them; promotion rewrites `kind` in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Which side owns the piece.
    pub color: Color,
    /// What the piece is.
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a piece.
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Kinds a pawn may promote to. There is no auto-queen default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum PromotionKind {
    /// Promote to a queen.
    Queen,
    /// Promote to a rook.
    Rook,
    /// Promote to a bishop.
    Bishop,
    /// Promote to a knight.
    Knight,
}

impl PromotionKind {
    /// Display label for choice menus.
    pub fn label(self) -> &'static str {
        match self {
            PromotionKind::Queen => "Queen",
            PromotionKind::Rook => "Rook",
            PromotionKind::Bishop => "Bishop",
            PromotionKind::Knight => "Knight",
        }
    }
}

impl From<PromotionKind> for PieceKind {
    fn from(kind: PromotionKind) -> Self {
        match kind {
            PromotionKind::Queen => PieceKind::Queen,
            PromotionKind::Rook => PieceKind::Rook,
            PromotionKind::Bishop => PieceKind::Bishop,
            PromotionKind::Knight => PieceKind::Knight,
        }
    }
}

impl std::fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
