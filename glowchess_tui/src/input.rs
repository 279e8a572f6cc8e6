//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use glowchess_core::Square;

/// Moves the cursor one square in the direction of an arrow key.
///
/// `flipped` is true when the board is rendered from Black's perspective,
/// so that arrows always track the direction shown on screen. The cursor
/// stays put at board edges.
pub fn move_cursor(cursor: Square, key: KeyCode, flipped: bool) -> Square {
    let sign: i8 = if flipped { -1 } else { 1 };
    let (dr, dc) = match key {
        KeyCode::Up => (-sign, 0),
        KeyCode::Down => (sign, 0),
        KeyCode::Left => (0, -sign),
        KeyCode::Right => (0, sign),
        _ => (0, 0),
    };
    cursor.offset(dr, dc).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_arrows_track_default_orientation() {
        assert_eq!(move_cursor(sq(4, 4), KeyCode::Up, false), sq(3, 4));
        assert_eq!(move_cursor(sq(4, 4), KeyCode::Down, false), sq(5, 4));
        assert_eq!(move_cursor(sq(4, 4), KeyCode::Left, false), sq(4, 3));
        assert_eq!(move_cursor(sq(4, 4), KeyCode::Right, false), sq(4, 5));
    }

    #[test]
    fn test_arrows_invert_when_flipped() {
        assert_eq!(move_cursor(sq(4, 4), KeyCode::Up, true), sq(5, 4));
        assert_eq!(move_cursor(sq(4, 4), KeyCode::Right, true), sq(4, 3));
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        assert_eq!(move_cursor(sq(0, 0), KeyCode::Up, false), sq(0, 0));
        assert_eq!(move_cursor(sq(0, 0), KeyCode::Left, false), sq(0, 0));
        assert_eq!(move_cursor(sq(7, 7), KeyCode::Down, false), sq(7, 7));
    }

    #[test]
    fn test_other_keys_leave_cursor() {
        assert_eq!(move_cursor(sq(2, 2), KeyCode::Enter, false), sq(2, 2));
    }
}
