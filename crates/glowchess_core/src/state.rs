//! The game state machine: turn, selection, en passant, promotion.
//!
//! A [`Game`] is a single owned state object; there is no ambient
//! singleton, so multiple independent games can coexist and tests stay
//! straightforward. All mutation flows through three entry points:
//! [`Game::click_square`], [`Game::choose_promotion`], and [`Game::reset`].
//! Each returns a transition event so callers can react without diffing
//! snapshots.

use crate::board::Board;
use crate::control::{control_map, ControlMap};
use crate::movegen::{generate, MoveSet};
use crate::piece::{Color, Piece, PieceKind, PromotionKind};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// The one live en-passant window, created by a two-square pawn advance.
///
/// Lifetime is exactly one ply: the record is consumed by the opposing
/// side's very next move if that move lands on `target`, and discarded
/// after any move that does not itself create a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnPassantRecord {
    /// The square the advancing pawn jumped over; the capture lands here.
    pub target: Square,
    /// The side allowed to capture en passant (the advancing pawn's opponent).
    pub eligible_side: Color,
    /// Where the double-stepped pawn currently sits (the capture victim).
    pub captured_square: Square,
}

/// An open promotion: a pawn has reached the last rank and the replacement
/// kind has not been chosen yet.
///
/// While this exists the turn has NOT flipped, the pawn is physically on
/// the last-rank square, and all board input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    /// The last-rank square holding the pawn.
    pub square: Square,
    /// The promoting side.
    pub color: Color,
}

/// The previous move's endpoints. Render-only; rule logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
}

/// The current selection with its cached legal destination sets.
///
/// Cached sets are recomputed on every selection and dropped on every
/// move, so they can never go stale across a board mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Selection {
    square: Square,
    targets: MoveSet,
}

/// What a completed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{from} -> {to}")]
pub struct MoveRecord {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// The piece removed by this move, if any.
    pub captured: Option<Piece>,
    /// Whether the capture was en passant.
    pub en_passant: bool,
}

/// Transition taken by a board click.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ClickOutcome {
    /// Nothing happened: idle no-op click, or input gated by an open promotion.
    #[display("ignored")]
    Ignored,
    /// A side-to-move piece was selected and its legal sets cached.
    #[display("selected {_0}")]
    Selected(Square),
    /// An existing selection was cleared without executing a move.
    #[display("selection cleared")]
    Cleared,
    /// A move executed and the turn flipped.
    #[display("moved {_0}")]
    Moved(MoveRecord),
    /// A move executed and opened a promotion; the turn has not flipped.
    #[display("promotion opened after {_0}")]
    PromotionOpened(MoveRecord),
}

/// Result of a promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PromotionOutcome {
    /// The pawn was rewritten and the turn flipped.
    #[display("promoted to {kind} on {square}")]
    Promoted {
        /// The promotion square.
        square: Square,
        /// The chosen replacement kind.
        kind: PromotionKind,
    },
    /// The transaction square no longer held a matching pawn; the
    /// transaction was discarded without mutating board or turn. Indicates
    /// a caller/state desync, recovered silently.
    #[display("stale transaction discarded")]
    Discarded,
    /// No promotion was open.
    #[display("no open transaction")]
    NoTransaction,
}

/// Read-only view of the game for rendering and persistence collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The board grid.
    pub board: Board,
    /// The side to move.
    pub turn: Color,
    /// The selected square, if any.
    pub selection: Option<Square>,
    /// Cached quiet-move destinations for the selection.
    pub legal_moves: Vec<Square>,
    /// Cached capture destinations for the selection.
    pub legal_attacks: Vec<Square>,
    /// The previous move's endpoints.
    pub last_move: Option<LastMove>,
    /// The open promotion, if any.
    pub pending_promotion: Option<PendingPromotion>,
}

/// A complete game: board plus all sequencing state, mutated only through
/// the click/promotion/reset entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    selection: Option<Selection>,
    last_move: Option<LastMove>,
    en_passant: Option<EnPassantRecord>,
    promotion: Option<PendingPromotion>,
    perspective: Color,
}

impl Game {
    /// Creates a game at the standard starting position, White to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Color::White,
            selection: None,
            last_move: None,
            en_passant: None,
            promotion: None,
            perspective: Color::White,
        }
    }

    /// Creates a game from an arbitrary position with `turn` to move.
    ///
    /// No transient state: nothing selected, no en-passant window, no open
    /// promotion. Intended for setting up study positions and tests.
    pub fn from_position(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            selection: None,
            last_move: None,
            en_passant: None,
            promotion: None,
            perspective: Color::White,
        }
    }

    /// Restores the starting position and clears all transient state.
    ///
    /// The perspective setting survives; it is a view preference, not game
    /// state. Idempotent.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("resetting game");
        self.board = Board::new();
        self.turn = Color::White;
        self.selection = None;
        self.last_move = None;
        self.en_passant = None;
        self.promotion = None;
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move. Unchanged while a promotion is open.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The selected square, if any.
    pub fn selected(&self) -> Option<Square> {
        self.selection.as_ref().map(|s| s.square)
    }

    /// The live en-passant record, if any.
    pub fn en_passant(&self) -> Option<EnPassantRecord> {
        self.en_passant
    }

    /// The open promotion, if any.
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.promotion
    }

    /// The previous move's endpoints, if any.
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// The side the control map classifies as friendly.
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    /// Sets the perspective side.
    ///
    /// Affects only friendly/enemy classification in [`Game::control_map`],
    /// never board semantics.
    #[instrument(skip(self))]
    pub fn set_perspective(&mut self, side: Color) {
        self.perspective = side;
    }

    /// Control counts for every square, classified by the current perspective.
    pub fn control_map(&self) -> ControlMap {
        control_map(&self.board, self.perspective)
    }

    /// Candidate destinations for the piece on `square`.
    ///
    /// Pure query; does not touch the selection.
    pub fn legal_targets(&self, square: Square) -> MoveSet {
        generate(&self.board, self.en_passant, square)
    }

    /// Handles a board click: the sole move-initiating entry point.
    ///
    /// Clicking a cached legal target executes the move; clicking an own
    /// piece (re)selects it; anything else clears the selection. All
    /// clicks are ignored while a promotion is open.
    #[instrument(skip(self))]
    pub fn click_square(&mut self, square: Square) -> ClickOutcome {
        if self.promotion.is_some() {
            debug!("board input rejected: promotion open");
            return ClickOutcome::Ignored;
        }

        if let Some(selection) = &self.selection {
            if selection.targets.contains(square) {
                let from = selection.square;
                return self.execute_move(from, square);
            }
        }

        match self.board.piece_at(square) {
            Some(piece) if piece.color == self.turn => {
                let targets = self.legal_targets(square);
                debug!(
                    moves = targets.moves.len(),
                    attacks = targets.attacks.len(),
                    "piece selected"
                );
                self.selection = Some(Selection { square, targets });
                ClickOutcome::Selected(square)
            }
            _ => {
                if self.selection.take().is_some() {
                    ClickOutcome::Cleared
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    /// Completes an open promotion with the chosen kind.
    ///
    /// If no promotion is open, or the transaction square no longer holds
    /// a pawn of the transaction's color, nothing is mutated: the stale
    /// transaction (if any) is discarded and the turn stays put.
    #[instrument(skip(self))]
    pub fn choose_promotion(&mut self, kind: PromotionKind) -> PromotionOutcome {
        let Some(pending) = self.promotion.take() else {
            return PromotionOutcome::NoTransaction;
        };

        match self.board.piece_at(pending.square) {
            Some(piece) if piece.kind == PieceKind::Pawn && piece.color == pending.color => {
                self.board
                    .set(pending.square, Some(Piece::new(pending.color, kind.into())));
                // A completed promotion always closes the en-passant window.
                self.en_passant = None;
                self.turn = self.turn.opponent();
                self.selection = None;
                info!(square = %pending.square, %kind, "promotion completed");
                PromotionOutcome::Promoted {
                    square: pending.square,
                    kind,
                }
            }
            _ => {
                debug!(square = %pending.square, "stale promotion discarded");
                PromotionOutcome::Discarded
            }
        }
    }

    /// Read-only snapshot for rendering.
    pub fn snapshot(&self) -> Snapshot {
        let (legal_moves, legal_attacks) = match &self.selection {
            Some(selection) => (
                selection.targets.moves.clone(),
                selection.targets.attacks.clone(),
            ),
            None => (Vec::new(), Vec::new()),
        };
        Snapshot {
            board: self.board.clone(),
            turn: self.turn,
            selection: self.selected(),
            legal_moves,
            legal_attacks,
            last_move: self.last_move,
            pending_promotion: self.promotion,
        }
    }

    /// Executes a pre-validated move from `from` to `to`.
    fn execute_move(&mut self, from: Square, to: Square) -> ClickOutcome {
        let Some(moving) = self.board.piece_at(from) else {
            // Selection invariant guarantees a piece here; recover by clearing.
            self.selection = None;
            return ClickOutcome::Cleared;
        };
        let target = self.board.piece_at(to);

        // Detect en passant before touching the grid: a pawn landing on the
        // empty recorded target square captures the recorded victim.
        let mut captured = target;
        let mut used_en_passant = false;
        if moving.kind == PieceKind::Pawn && target.is_none() {
            if let Some(ep) = self.en_passant {
                if ep.eligible_side == moving.color && ep.target == to {
                    if let Some(victim) = self.board.take(ep.captured_square) {
                        captured = Some(victim);
                        used_en_passant = true;
                    }
                }
            }
        }

        self.board.set(to, Some(moving));
        self.board.set(from, None);
        self.last_move = Some(LastMove { from, to });

        // A double pawn push that was not itself an en-passant capture opens
        // a one-ply capture window for the opponent on the jumped square.
        let double_push = moving.kind == PieceKind::Pawn
            && (to.row() as i16 - from.row() as i16).abs() == 2;
        self.en_passant = if double_push && !used_en_passant {
            from.offset(moving.color.pawn_direction(), 0)
                .map(|jumped| EnPassantRecord {
                    target: jumped,
                    eligible_side: moving.color.opponent(),
                    captured_square: to,
                })
        } else {
            None
        };

        let record = MoveRecord {
            from,
            to,
            captured,
            en_passant: used_en_passant,
        };

        if moving.kind == PieceKind::Pawn && to.row() == moving.color.promotion_row() {
            // The move is incomplete until a kind is chosen: no turn flip.
            self.promotion = Some(PendingPromotion {
                square: to,
                color: moving.color,
            });
            self.selection = None;
            info!(%record, "promotion opened");
            return ClickOutcome::PromotionOpened(record);
        }

        self.turn = self.turn.opponent();
        self.selection = None;
        debug!(%record, turn = %self.turn, "move executed");
        ClickOutcome::Moved(record)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
