//! Per-square control counts for the threat-visualization overlay.
//!
//! Control deliberately differs from move/attack generation:
//! - a pawn controls both forward diagonals unconditionally, whether they
//!   are occupied, empty, or clipped off the board;
//! - a sliding ray counts every square up to and including its first
//!   blocker, regardless of the blocker's color (defended squares count).
//!
//! Move generation treats a friendly-occupied square as unreachable; the
//! overlay still counts it as controlled. The asymmetry is intentional and
//! must not be unified with the movement rules.

use crate::board::Board;
use crate::movegen::{
    BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRS, ROOK_DIRS,
};
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How many pieces of each side control every square.
///
/// "Friendly" and "enemy" are relative to the perspective side passed to
/// [`control_map`], not to an absolute color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlMap {
    friendly: [[u8; 8]; 8],
    enemy: [[u8; 8]; 8],
}

impl ControlMap {
    /// Count of perspective-side pieces controlling `square`.
    pub fn friendly_at(&self, square: Square) -> u8 {
        self.friendly[square.row() as usize][square.col() as usize]
    }

    /// Count of opposing pieces controlling `square`.
    pub fn enemy_at(&self, square: Square) -> u8 {
        self.enemy[square.row() as usize][square.col() as usize]
    }
}

/// Computes control counts for the whole board.
///
/// Pieces whose color matches `perspective` contribute to the friendly
/// grid, all others to the enemy grid. The perspective is a pure parameter
/// and never affects board semantics.
#[instrument(skip(board))]
pub fn control_map(board: &Board, perspective: Color) -> ControlMap {
    let mut map = ControlMap::default();
    for (square, piece) in board.pieces() {
        let grid = if piece.color == perspective {
            &mut map.friendly
        } else {
            &mut map.enemy
        };
        for controlled in controlled_squares(board, square, piece) {
            grid[controlled.row() as usize][controlled.col() as usize] += 1;
        }
    }
    map
}

/// Squares the piece on `square` controls.
pub fn controlled_squares(board: &Board, square: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Knight => offset_targets(square, &KNIGHT_OFFSETS),
        PieceKind::King => offset_targets(square, &KING_OFFSETS),
        PieceKind::Bishop => ray_targets(board, square, &BISHOP_DIRS),
        PieceKind::Rook => ray_targets(board, square, &ROOK_DIRS),
        PieceKind::Queen => ray_targets(board, square, &QUEEN_DIRS),
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            [-1, 1]
                .into_iter()
                .filter_map(|dc| square.offset(dir, dc))
                .collect()
        }
    }
}

fn offset_targets(square: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| square.offset(dr, dc))
        .collect()
}

/// Walks each ray, including the first occupied square and then stopping.
fn ray_targets(board: &Board, square: Square, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut targets = Vec::new();
    for &(dr, dc) in directions {
        let mut cursor = square.offset(dr, dc);
        while let Some(dest) = cursor {
            targets.push(dest);
            if !board.is_empty(dest) {
                break;
            }
            cursor = dest.offset(dr, dc);
        }
    }
    targets
}
