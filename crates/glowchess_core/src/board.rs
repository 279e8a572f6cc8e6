//! The board model: 64 slots, at most one piece per square.

use crate::piece::{Color, Piece, PieceKind};
use crate::square::{Square, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// Back-rank layout shared by both sides in the starting position.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8x8 grid of optional pieces.
///
/// The board is a dumb container: it never enforces movement rules. All
/// mutation is sequenced by the game state machine; everything else reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a board with the standard starting position.
    ///
    /// Row 0 holds Black's back rank, row 1 Black's pawns; rows 6 and 7
    /// mirror them for White.
    pub fn new() -> Self {
        let mut grid: [[Option<Piece>; 8]; 8] = Default::default();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            grid[0][col] = Some(Piece::new(Color::Black, kind));
            grid[7][col] = Some(Piece::new(Color::White, kind));
        }
        for col in 0..8 {
            grid[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            grid[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
        }
        Self { grid }
    }

    /// Creates an empty board. Useful for setting up test positions.
    pub fn empty() -> Self {
        Self {
            grid: Default::default(),
        }
    }

    /// Returns the piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    /// Returns the piece at a signed coordinate pair.
    ///
    /// Off-board coordinates answer "no piece present" rather than failing,
    /// so ray walks and offset probes need no separate bounds handling.
    pub fn at(&self, row: i16, col: i16) -> Option<Piece> {
        if (0..BOARD_SIZE as i16).contains(&row) && (0..BOARD_SIZE as i16).contains(&col) {
            self.grid[row as usize][col as usize]
        } else {
            None
        }
    }

    /// Checks whether `square` holds no piece.
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Places `piece` on `square`, overwriting any occupant.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.row() as usize][square.col() as usize] = piece;
    }

    /// Removes and returns the piece on `square`.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize].take()
    }

    /// Iterates every occupied square with its piece, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Counts pieces of the given color.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// White pieces are uppercase, Black lowercase, empty squares dots.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let symbol = match self.grid[row as usize][col as usize] {
                    Some(p) if p.color == Color::White => p.kind.letter(),
                    Some(p) => p.kind.letter().to_ascii_lowercase(),
                    None => '.',
                };
                result.push(symbol);
                if col < BOARD_SIZE - 1 {
                    result.push(' ');
                }
            }
            if row < BOARD_SIZE - 1 {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_census() {
        let board = Board::new();
        assert_eq!(board.count(Color::White), 16);
        assert_eq!(board.count(Color::Black), 16);
    }

    #[test]
    fn test_at_off_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.at(-1, 0), None);
        assert_eq!(board.at(0, 8), None);
        assert_eq!(board.at(8, 8), None);
    }

    #[test]
    fn test_set_take_round_trip() {
        let mut board = Board::empty();
        let sq = Square::new(3, 3).unwrap();
        let piece = Piece::new(Color::White, PieceKind::Knight);
        board.set(sq, Some(piece));
        assert_eq!(board.piece_at(sq), Some(piece));
        assert_eq!(board.take(sq), Some(piece));
        assert!(board.is_empty(sq));
    }
}
