//! Per-piece move and attack generation.
//!
//! Pure functions over the board plus the live en-passant record: nothing
//! here mutates state. Destinations are split into quiet moves (empty
//! squares) and attacks (enemy-occupied squares, plus the en-passant
//! target). A square occupied by a friendly piece is neither.

use crate::board::Board;
use crate::piece::{Color, PieceKind};
use crate::square::Square;
use crate::state::EnPassantRecord;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// L-shaped knight jumps.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// The eight adjacent cells around a king.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Diagonal ray directions (bishop).
pub(crate) const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Rank and file ray directions (rook).
pub(crate) const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// All eight ray directions (queen).
pub(crate) const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

/// Candidate destinations for one piece, split into quiet moves and captures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSet {
    /// Destinations that are empty squares.
    pub moves: Vec<Square>,
    /// Destinations holding a capturable enemy piece (or the en-passant target).
    pub attacks: Vec<Square>,
}

impl MoveSet {
    /// True when neither set contains any destination.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.attacks.is_empty()
    }

    /// Whether `square` is a destination in either set.
    pub fn contains(&self, square: Square) -> bool {
        self.moves.contains(&square) || self.attacks.contains(&square)
    }

    /// Applies a presentation filter, dropping the set the mode hides.
    ///
    /// This is display-only: move execution always validates against the
    /// unfiltered result.
    pub fn filtered(&self, mode: HighlightMode) -> MoveSet {
        MoveSet {
            moves: if mode.shows_moves() {
                self.moves.clone()
            } else {
                Vec::new()
            },
            attacks: if mode.shows_attacks() {
                self.attacks.clone()
            } else {
                Vec::new()
            },
        }
    }
}

/// Which destination sets the UI highlights for a selected piece.
///
/// Purely presentational; legality is always computed with both sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightMode {
    /// Show quiet moves and attacks.
    #[default]
    Both,
    /// Show quiet moves only.
    Moves,
    /// Show attacks only.
    Attacks,
}

impl HighlightMode {
    /// Whether quiet moves are shown.
    pub fn shows_moves(self) -> bool {
        matches!(self, HighlightMode::Both | HighlightMode::Moves)
    }

    /// Whether attacks are shown.
    pub fn shows_attacks(self) -> bool {
        matches!(self, HighlightMode::Both | HighlightMode::Attacks)
    }

    /// Advances to the next mode (for a toggle control).
    pub fn cycle(self) -> Self {
        match self {
            HighlightMode::Both => HighlightMode::Moves,
            HighlightMode::Moves => HighlightMode::Attacks,
            HighlightMode::Attacks => HighlightMode::Both,
        }
    }

    /// Display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            HighlightMode::Both => "Moves + attacks",
            HighlightMode::Moves => "Moves only",
            HighlightMode::Attacks => "Attacks only",
        }
    }
}

/// Generates candidate destinations for the piece on `square`.
///
/// Returns an empty set when the square is vacant. Deterministic and pure
/// with respect to the board and the en-passant record.
#[instrument(skip(board, en_passant))]
pub fn generate(board: &Board, en_passant: Option<EnPassantRecord>, square: Square) -> MoveSet {
    let Some(piece) = board.piece_at(square) else {
        return MoveSet::default();
    };
    match piece.kind {
        PieceKind::Knight => leaper(board, square, piece.color, &KNIGHT_OFFSETS),
        PieceKind::King => leaper(board, square, piece.color, &KING_OFFSETS),
        PieceKind::Bishop => slider(board, square, piece.color, &BISHOP_DIRS),
        PieceKind::Rook => slider(board, square, piece.color, &ROOK_DIRS),
        PieceKind::Queen => slider(board, square, piece.color, &QUEEN_DIRS),
        PieceKind::Pawn => pawn(board, en_passant, square, piece.color),
    }
}

/// Fixed-offset pieces: each in-bounds destination is a move if empty, an
/// attack if enemy-occupied, and excluded entirely if friendly-occupied.
fn leaper(board: &Board, square: Square, color: Color, offsets: &[(i8, i8)]) -> MoveSet {
    let mut set = MoveSet::default();
    for &(dr, dc) in offsets {
        let Some(dest) = square.offset(dr, dc) else {
            continue;
        };
        match board.piece_at(dest) {
            None => set.moves.push(dest),
            Some(target) if target.color != color => set.attacks.push(dest),
            Some(_) => {}
        }
    }
    set
}

/// Ray-casting pieces: empty squares along a ray are moves and the ray
/// continues; the first occupied square stops the ray, contributing an
/// attack only when enemy-colored.
fn slider(board: &Board, square: Square, color: Color, directions: &[(i8, i8)]) -> MoveSet {
    let mut set = MoveSet::default();
    for &(dr, dc) in directions {
        let mut cursor = square.offset(dr, dc);
        while let Some(dest) = cursor {
            match board.piece_at(dest) {
                None => {
                    set.moves.push(dest);
                    cursor = dest.offset(dr, dc);
                }
                Some(target) => {
                    if target.color != color {
                        set.attacks.push(dest);
                    }
                    break;
                }
            }
        }
    }
    set
}

/// Pawn rules: forward pushes gated on emptiness (double push additionally
/// on the home row), diagonal captures on enemy occupancy or on the live
/// en-passant target square.
fn pawn(
    board: &Board,
    en_passant: Option<EnPassantRecord>,
    square: Square,
    color: Color,
) -> MoveSet {
    let mut set = MoveSet::default();
    let dir = color.pawn_direction();

    if let Some(one) = square.offset(dir, 0) {
        if board.is_empty(one) {
            set.moves.push(one);
            if square.row() == color.pawn_home_row() {
                if let Some(two) = square.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        set.moves.push(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(diag) = square.offset(dir, dc) else {
            continue;
        };
        match board.piece_at(diag) {
            Some(target) if target.color != color => set.attacks.push(diag),
            Some(_) => {}
            None => {
                // En passant: the diagonal is empty but matches the stored
                // target square for this side.
                if let Some(ep) = en_passant {
                    if ep.eligible_side == color && ep.target == diag {
                        set.attacks.push(diag);
                    }
                }
            }
        }
    }

    set
}
