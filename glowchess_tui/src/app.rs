//! Application state and input handling.

use crate::input::move_cursor;
use crate::prefs::Preferences;
use crate::ui::{CELL_HEIGHT, CELL_WIDTH};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use glowchess_core::{Color, Game, HighlightMode, PromotionKind, Square};
use ratatui::layout::Rect;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Main application state: the game plus presentation-only settings.
pub struct App {
    game: Game,
    cursor: Square,
    mode: HighlightMode,
    show_control: bool,
    prefs: Preferences,
    prefs_path: PathBuf,
    board_area: Option<Rect>,
    status: String,
    should_quit: bool,
}

impl App {
    /// Creates the application with loaded preferences.
    pub fn new(prefs: Preferences, prefs_path: PathBuf) -> Self {
        Self {
            game: Game::new(),
            cursor: Square::new(6, 4).expect("valid cursor start"),
            mode: HighlightMode::default(),
            show_control: false,
            prefs,
            prefs_path,
            board_area: None,
            status: "White to move. Click a piece or press Enter on it.".to_string(),
            should_quit: false,
        }
    }

    /// The game engine.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The keyboard cursor square.
    pub fn cursor(&self) -> Square {
        self.cursor
    }

    /// The active highlight mode.
    pub fn mode(&self) -> HighlightMode {
        self.mode
    }

    /// Whether the control-count overlay is shown.
    pub fn show_control(&self) -> bool {
        self.show_control
    }

    /// Current display preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// The latest status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True when the board is rendered from Black's side.
    pub fn flipped(&self) -> bool {
        self.game.perspective() == Color::Black
    }

    /// Records where the board grid was drawn, for mouse mapping.
    pub fn set_board_area(&mut self, area: Rect) {
        self.board_area = Some(area);
    }

    /// Maps a display cell to a board square, honoring orientation.
    pub fn display_to_board(&self, row: u8, col: u8) -> Square {
        let (row, col) = if self.flipped() {
            (7 - row, 7 - col)
        } else {
            (row, col)
        };
        Square::new(row, col).expect("display cell in range")
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // An open promotion gates everything except the choice keys; the
        // engine would ignore board clicks anyway, but there is no point
        // moving the cursor under a modal prompt.
        if self.game.pending_promotion().is_some() {
            let kind = match key.code {
                KeyCode::Char('q') => Some(PromotionKind::Queen),
                KeyCode::Char('r') => Some(PromotionKind::Rook),
                KeyCode::Char('b') => Some(PromotionKind::Bishop),
                KeyCode::Char('n') => Some(PromotionKind::Knight),
                _ => None,
            };
            if let Some(kind) = kind {
                let outcome = self.game.choose_promotion(kind);
                self.status = format!("{outcome}");
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => {
                self.game.reset();
                self.status = "New game. White to move.".to_string();
            }
            KeyCode::Char('m') => {
                self.mode = self.mode.cycle();
                self.status = format!("Highlights: {}", self.mode.label());
            }
            KeyCode::Char('c') => {
                self.show_control = !self.show_control;
            }
            KeyCode::Char('p') => {
                let side = self.game.perspective().opponent();
                self.game.set_perspective(side);
                self.status = format!("Viewing from {side}'s side");
            }
            KeyCode::Char('t') => {
                self.prefs.board_theme = self.prefs.board_theme.cycle();
                self.save_prefs();
            }
            KeyCode::Char('s') => {
                self.prefs.piece_style = self.prefs.piece_style.cycle();
                self.save_prefs();
            }
            KeyCode::Char('g') => {
                self.prefs.move_glow = self.prefs.move_glow.cycle();
                self.save_prefs();
            }
            KeyCode::Char('a') => {
                self.prefs.attack_glow = self.prefs.attack_glow.cycle();
                self.save_prefs();
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code, self.flipped());
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.click(self.cursor),
            _ => {}
        }
    }

    /// Handles a mouse event: left click selects or moves.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        let Some(area) = self.board_area else {
            return;
        };
        if mouse.column < area.x || mouse.row < area.y {
            return;
        }
        let col = (mouse.column - area.x) / CELL_WIDTH;
        let row = (mouse.row - area.y) / CELL_HEIGHT;
        if col >= 8 || row >= 8 {
            return;
        }
        let square = self.display_to_board(row as u8, col as u8);
        self.cursor = square;
        self.click(square);
    }

    fn click(&mut self, square: Square) {
        let outcome = self.game.click_square(square);
        debug!(%square, ?outcome, "square clicked");
        self.status = if self.game.pending_promotion().is_some() {
            "Promote: [q]ueen  [r]ook  [b]ishop  k[n]ight".to_string()
        } else {
            format!("{outcome}. {} to move.", self.game.turn())
        };
    }

    fn save_prefs(&mut self) {
        if let Err(e) = self.prefs.save(&self.prefs_path) {
            warn!(error = %e, "failed to save preferences");
            self.status = "Could not save preferences".to_string();
        }
    }
}
