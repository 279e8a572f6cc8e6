//! Tests for the turn/selection state machine, en passant, and promotion.

use glowchess_core::{
    Board, ClickOutcome, Color, EnPassantRecord, Game, Piece, PieceKind, PromotionKind,
    PromotionOutcome, Square,
};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

/// Selects `from` and clicks `to`, asserting both steps succeed.
fn play(game: &mut Game, from: Square, to: Square) -> ClickOutcome {
    assert_eq!(game.click_square(from), ClickOutcome::Selected(from));
    let outcome = game.click_square(to);
    assert!(
        matches!(
            outcome,
            ClickOutcome::Moved(_) | ClickOutcome::PromotionOpened(_)
        ),
        "expected a move from {from} to {to}, got {outcome:?}"
    );
    outcome
}

#[test]
fn test_idle_clicks_are_noops() {
    let mut game = Game::new();
    // Empty square.
    assert_eq!(game.click_square(sq(4, 4)), ClickOutcome::Ignored);
    // Opponent's piece.
    assert_eq!(game.click_square(sq(1, 0)), ClickOutcome::Ignored);
    assert_eq!(game.selected(), None);
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_select_reselect_and_clear() {
    let mut game = Game::new();
    assert_eq!(game.click_square(sq(6, 4)), ClickOutcome::Selected(sq(6, 4)));
    let snap = game.snapshot();
    assert_eq!(snap.selection, Some(sq(6, 4)));
    assert_eq!(snap.legal_moves, vec![sq(5, 4), sq(4, 4)]);
    assert!(snap.legal_attacks.is_empty());

    // Clicking another own piece reselects.
    assert_eq!(game.click_square(sq(7, 1)), ClickOutcome::Selected(sq(7, 1)));

    // Clicking a non-target clears without moving.
    let board_before = game.board().clone();
    assert_eq!(game.click_square(sq(3, 3)), ClickOutcome::Cleared);
    assert_eq!(game.selected(), None);
    assert_eq!(game.board(), &board_before);
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_move_flips_turn_and_records_last_move() {
    let mut game = Game::new();
    let outcome = play(&mut game, sq(6, 4), sq(4, 4));
    let ClickOutcome::Moved(record) = outcome else {
        panic!("expected Moved");
    };
    assert_eq!(record.from, sq(6, 4));
    assert_eq!(record.to, sq(4, 4));
    assert_eq!(record.captured, None);
    assert!(!record.en_passant);
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.selected(), None);
    let last = game.last_move().unwrap();
    assert_eq!((last.from, last.to), (sq(6, 4), sq(4, 4)));
}

#[test]
fn test_double_push_creates_en_passant_record() {
    let mut game = Game::new();
    play(&mut game, sq(6, 4), sq(4, 4));
    assert_eq!(
        game.en_passant(),
        Some(EnPassantRecord {
            target: sq(5, 4),
            eligible_side: Color::Black,
            captured_square: sq(4, 4),
        })
    );

    // Any following move that is not itself a double push clears it.
    play(&mut game, sq(0, 1), sq(2, 2));
    assert_eq!(game.en_passant(), None);
}

#[test]
fn test_en_passant_capture_removes_victim() {
    let mut game = Game::new();
    // Bring a Black pawn to rest beside White's double-push destination.
    play(&mut game, sq(6, 0), sq(5, 0));
    play(&mut game, sq(1, 3), sq(3, 3));
    play(&mut game, sq(6, 7), sq(5, 7));
    play(&mut game, sq(3, 3), sq(4, 3));
    play(&mut game, sq(6, 4), sq(4, 4));

    assert_eq!(game.click_square(sq(4, 3)), ClickOutcome::Selected(sq(4, 3)));
    assert!(game.snapshot().legal_attacks.contains(&sq(5, 4)));

    let outcome = game.click_square(sq(5, 4));
    let ClickOutcome::Moved(record) = outcome else {
        panic!("expected Moved, got {outcome:?}");
    };
    assert!(record.en_passant);
    assert_eq!(record.captured, Some(Piece::new(Color::White, PieceKind::Pawn)));

    // The victim square is vacated, the capturer landed on the target.
    assert!(game.board().is_empty(sq(4, 4)));
    assert!(game.board().is_empty(sq(4, 3)));
    assert_eq!(
        game.board().piece_at(sq(5, 4)),
        Some(Piece::new(Color::Black, PieceKind::Pawn))
    );
    assert_eq!(game.en_passant(), None);
}

#[test]
fn test_en_passant_window_expires_unused() {
    let mut game = Game::new();
    play(&mut game, sq(6, 0), sq(5, 0));
    play(&mut game, sq(1, 3), sq(3, 3));
    play(&mut game, sq(6, 7), sq(5, 7));
    play(&mut game, sq(3, 3), sq(4, 3));
    play(&mut game, sq(6, 4), sq(4, 4));

    // Black declines the capture; the window closes after this ply.
    play(&mut game, sq(1, 7), sq(2, 7));
    assert_eq!(game.en_passant(), None);

    // The bypassed pawn can no longer be taken en passant.
    play(&mut game, sq(6, 6), sq(5, 6));
    assert_eq!(game.click_square(sq(4, 3)), ClickOutcome::Selected(sq(4, 3)));
    assert!(!game.snapshot().legal_attacks.contains(&sq(5, 4)));
}

#[test]
fn test_promotion_transaction_flow() {
    let mut board = Board::empty();
    board.set(sq(1, 0), Some(Piece::new(Color::White, PieceKind::Pawn)));
    let mut game = Game::from_position(board, Color::White);

    let outcome = play(&mut game, sq(1, 0), sq(0, 0));
    let ClickOutcome::PromotionOpened(record) = outcome else {
        panic!("expected PromotionOpened, got {outcome:?}");
    };
    assert_eq!(record.to, sq(0, 0));

    // The pawn already sits on the last rank and the turn has not flipped.
    assert_eq!(
        game.board().piece_at(sq(0, 0)),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(game.turn(), Color::White);
    let pending = game.pending_promotion().unwrap();
    assert_eq!((pending.square, pending.color), (sq(0, 0), Color::White));

    // The transaction is a critical section: board input is rejected.
    assert_eq!(game.click_square(sq(0, 0)), ClickOutcome::Ignored);
    assert_eq!(game.click_square(sq(4, 4)), ClickOutcome::Ignored);

    assert_eq!(
        game.choose_promotion(PromotionKind::Queen),
        PromotionOutcome::Promoted {
            square: sq(0, 0),
            kind: PromotionKind::Queen,
        }
    );
    assert_eq!(
        game.board().piece_at(sq(0, 0)),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(game.en_passant(), None);
}

#[test]
fn test_black_promotes_on_row_seven() {
    let mut board = Board::empty();
    board.set(sq(6, 5), Some(Piece::new(Color::Black, PieceKind::Pawn)));
    let mut game = Game::from_position(board, Color::Black);

    let outcome = play(&mut game, sq(6, 5), sq(7, 5));
    assert!(matches!(outcome, ClickOutcome::PromotionOpened(_)));
    assert_eq!(game.turn(), Color::Black);

    assert_eq!(
        game.choose_promotion(PromotionKind::Knight),
        PromotionOutcome::Promoted {
            square: sq(7, 5),
            kind: PromotionKind::Knight,
        }
    );
    assert_eq!(
        game.board().piece_at(sq(7, 5)),
        Some(Piece::new(Color::Black, PieceKind::Knight))
    );
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_promotion_by_capture_also_opens_transaction() {
    let mut board = Board::empty();
    board.set(sq(1, 3), Some(Piece::new(Color::White, PieceKind::Pawn)));
    board.set(sq(0, 4), Some(Piece::new(Color::Black, PieceKind::Rook)));
    let mut game = Game::from_position(board, Color::White);

    assert_eq!(game.click_square(sq(1, 3)), ClickOutcome::Selected(sq(1, 3)));
    assert!(game.snapshot().legal_attacks.contains(&sq(0, 4)));
    let outcome = game.click_square(sq(0, 4));
    let ClickOutcome::PromotionOpened(record) = outcome else {
        panic!("expected PromotionOpened, got {outcome:?}");
    };
    assert_eq!(record.captured, Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_reset_is_idempotent() {
    let mut game = Game::new();
    play(&mut game, sq(6, 4), sq(4, 4));
    play(&mut game, sq(1, 4), sq(3, 4));
    game.click_square(sq(7, 3));

    game.reset();
    let once = game.snapshot();
    game.reset();
    let twice = game.snapshot();

    assert_eq!(once, twice);
    assert_eq!(once, Game::new().snapshot());
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.last_move(), None);
}

#[test]
fn test_set_perspective_never_touches_board_state() {
    let mut game = Game::new();
    let before = game.snapshot();
    game.set_perspective(Color::Black);
    assert_eq!(game.perspective(), Color::Black);
    assert_eq!(game.snapshot(), before);

    // Classification flips with the perspective.
    let probe = sq(5, 4);
    assert!(game.control_map().enemy_at(probe) >= 1);
    game.set_perspective(Color::White);
    assert!(game.control_map().friendly_at(probe) >= 1);
}

#[test]
fn test_snapshot_serializes() {
    let mut game = Game::new();
    game.click_square(sq(6, 4));
    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: glowchess_core::Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}
