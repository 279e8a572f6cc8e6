//! Board and sidebar rendering.
//!
//! Everything here reads a [`glowchess_core::Snapshot`] taken after the
//! last transition; rendering never touches rule state.

use crate::app::App;
use crate::prefs::PieceStyle;
use glowchess_core::{Color as Side, Piece, PieceKind, Snapshot, Square};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Terminal columns per board square.
pub const CELL_WIDTH: u16 = 4;
/// Terminal rows per board square.
pub const CELL_HEIGHT: u16 = 2;

/// Renders the whole frame: board on the left, sidebar on the right.
pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::horizontal([
        Constraint::Length(8 * CELL_WIDTH + 2),
        Constraint::Min(36),
    ])
    .split(f.area());
    render_board(f, chunks[0], app);
    render_sidebar(f, chunks[1], app);
}

fn render_board(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title("glowchess");
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.set_board_area(inner);

    let snap = app.game().snapshot();
    let control = app
        .show_control()
        .then(|| app.game().control_map());

    for display_row in 0..8u8 {
        for display_col in 0..8u8 {
            let square = app.display_to_board(display_row, display_col);
            let cell = Rect {
                x: inner.x + display_col as u16 * CELL_WIDTH,
                y: inner.y + display_row as u16 * CELL_HEIGHT,
                width: CELL_WIDTH,
                height: CELL_HEIGHT,
            }
            .intersection(inner);
            if cell.width == 0 || cell.height == 0 {
                continue;
            }

            let bg = square_background(app, &snap, square);
            let mut lines = vec![piece_line(app, &snap, square)];
            if let Some(map) = &control {
                let friendly = map.friendly_at(square);
                let enemy = map.enemy_at(square);
                let text = if friendly == 0 && enemy == 0 {
                    String::new()
                } else {
                    format!("{friendly}:{enemy}")
                };
                lines.push(Line::styled(
                    format!("{text:^width$}", width = CELL_WIDTH as usize),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
            f.render_widget(paragraph, cell);
        }
    }
}

/// Background color for a square: theme checker pattern, then last-move
/// tint, then selection, then the legal-target glows (filtered by the
/// highlight mode; legality itself is unaffected).
fn square_background(app: &App, snap: &Snapshot, square: Square) -> Color {
    let (light, dark) = app.prefs().board_theme.colors();
    let mut bg = if (square.row() + square.col()) % 2 == 0 {
        light
    } else {
        dark
    };

    if let Some(last) = snap.last_move {
        if last.from == square || last.to == square {
            bg = Color::Rgb(186, 186, 120);
        }
    }
    if snap.selection == Some(square) {
        bg = Color::Rgb(255, 255, 140);
    }
    if app.mode().shows_moves() && snap.legal_moves.contains(&square) {
        bg = app.prefs().move_glow.color();
    }
    if app.mode().shows_attacks() && snap.legal_attacks.contains(&square) {
        bg = app.prefs().attack_glow.color();
    }
    bg
}

fn piece_line(app: &App, snap: &Snapshot, square: Square) -> Line<'static> {
    let cursor_here = app.cursor() == square;
    let content = match snap.board.piece_at(square) {
        Some(piece) => glyph(piece, app.prefs().piece_style),
        None if cursor_here => "+".to_string(),
        None => String::new(),
    };
    let mut style = match snap.board.piece_at(square).map(|p| p.color) {
        Some(Side::White) => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        Some(Side::Black) => Style::default()
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::DarkGray),
    };
    if cursor_here {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Line::styled(
        format!("{content:^width$}", width = CELL_WIDTH as usize),
        style,
    )
}

fn glyph(piece: Piece, style: PieceStyle) -> String {
    match style {
        PieceStyle::Letters => {
            let letter = piece.kind.letter();
            match piece.color {
                Side::White => letter.to_string(),
                Side::Black => letter.to_ascii_lowercase().to_string(),
            }
        }
        PieceStyle::Unicode => {
            let glyph = match (piece.color, piece.kind) {
                (Side::White, PieceKind::King) => '♔',
                (Side::White, PieceKind::Queen) => '♕',
                (Side::White, PieceKind::Rook) => '♖',
                (Side::White, PieceKind::Bishop) => '♗',
                (Side::White, PieceKind::Knight) => '♘',
                (Side::White, PieceKind::Pawn) => '♙',
                (Side::Black, PieceKind::King) => '♚',
                (Side::Black, PieceKind::Queen) => '♛',
                (Side::Black, PieceKind::Rook) => '♜',
                (Side::Black, PieceKind::Bishop) => '♝',
                (Side::Black, PieceKind::Knight) => '♞',
                (Side::Black, PieceKind::Pawn) => '♟',
            };
            glyph.to_string()
        }
    }
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let snap = app.game().snapshot();
    let prefs = app.prefs();

    let turn = if snap.pending_promotion.is_some() {
        format!("Turn: {} (choosing promotion)", snap.turn)
    } else {
        format!("Turn: {}", snap.turn)
    };

    let mut lines = vec![
        Line::from(turn),
        Line::from(""),
    ];
    if snap.pending_promotion.is_some() {
        lines.push(Line::styled(
            "Promote: [q]ueen [r]ook [b]ishop k[n]ight",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(format!("[m] Highlights: {}", app.mode().label())));
    lines.push(Line::from(format!(
        "[p] Perspective: {}",
        app.game().perspective()
    )));
    lines.push(Line::from(format!(
        "[c] Control overlay: {}",
        if app.show_control() { "on" } else { "off" }
    )));
    lines.push(Line::from(format!(
        "[t] Board theme: {}",
        prefs.board_theme.label()
    )));
    lines.push(Line::from(format!(
        "[s] Pieces: {}",
        prefs.piece_style.label()
    )));
    lines.push(Line::from(format!(
        "[g] Move glow: {}",
        prefs.move_glow.label()
    )));
    lines.push(Line::from(format!(
        "[a] Attack glow: {}",
        prefs.attack_glow.label()
    )));
    lines.push(Line::from(""));
    if let Some(last) = snap.last_move {
        lines.push(Line::from(format!("Last move: {} to {}", last.from, last.to)));
    }
    lines.push(Line::from(app.status().to_string()));
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "arrows + enter or mouse click to play",
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::styled(
        "[r] reset  [q] quit",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("status"));
    f.render_widget(paragraph, area);
}
