//! Board coordinates.

use serde::{Deserialize, Serialize};

/// Number of ranks and files on the board.
pub const BOARD_SIZE: u8 = 8;

/// A coordinate on the 8x8 board.
///
/// Row 0 is the far rank (Black's back rank in the default orientation),
/// row 7 the near rank (White's). Construction is checked, so a `Square`
/// value is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square from row and column, or `None` if either is off the board.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Row of this square (0 = far rank).
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Column of this square (0 = leftmost file in the default orientation).
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Flat index in row-major order (0-63).
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// Steps by a signed row/column delta, or `None` if the result leaves the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if (0..BOARD_SIZE as i16).contains(&row) && (0..BOARD_SIZE as i16).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Iterates all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Algebraic notation: column maps to file a-h, row 0 is rank 8.
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE - self.row;
        write!(f, "{file}{rank}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_off_board() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn test_offset_clips_at_edges() {
        let corner = Square::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Square::new(1, 1));
    }

    #[test]
    fn test_all_covers_board_once() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::new(0, 0).unwrap());
        assert_eq!(squares[63], Square::new(7, 7).unwrap());
    }

    #[test]
    fn test_display_algebraic() {
        assert_eq!(Square::new(7, 0).unwrap().to_string(), "a1");
        assert_eq!(Square::new(0, 7).unwrap().to_string(), "h8");
        assert_eq!(Square::new(4, 4).unwrap().to_string(), "e4");
    }
}
