//! Glowchess core: the move-generation and game-state engine behind an
//! interactive chessboard.
//!
//! The crate owns everything with real invariants and sequencing logic:
//!
//! - **Board model**: an 8x8 grid of optional pieces with pure accessors.
//! - **Move/attack generation**: per-piece-kind rules producing quiet-move
//!   and capture destination sets.
//! - **Control maps**: per-square counts of how many pieces of each side
//!   control it, for the threat-visualization overlay.
//! - **Game state machine**: turn, selection, en-passant bookkeeping, and
//!   the two-phase promotion transaction.
//!
//! Rendering, theming, and preference persistence are thin collaborators
//! that read [`Snapshot`]s and send clicks; they never touch rules.
//!
//! Deliberately out of scope: check/pin detection, castling, mate
//! detection, and any search. Invalid input no-ops instead of failing.
//!
//! # Example
//!
//! ```
//! use glowchess_core::{ClickOutcome, Game, Square};
//!
//! let mut game = Game::new();
//! let from = Square::new(6, 4).unwrap();
//! let to = Square::new(4, 4).unwrap();
//!
//! assert_eq!(game.click_square(from), ClickOutcome::Selected(from));
//! assert!(matches!(game.click_square(to), ClickOutcome::Moved(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod control;
mod movegen;
mod piece;
mod square;
mod state;

pub use board::Board;
pub use control::{control_map, controlled_squares, ControlMap};
pub use movegen::{generate, HighlightMode, MoveSet};
pub use piece::{Color, Piece, PieceKind, PromotionKind};
pub use square::{Square, BOARD_SIZE};
pub use state::{
    ClickOutcome, EnPassantRecord, Game, LastMove, MoveRecord, PendingPromotion,
    PromotionOutcome, Snapshot,
};
