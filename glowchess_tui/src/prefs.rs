//! Persisted display preferences.
//!
//! Board theme, piece style, and highlight glow colors survive restarts
//! via a small JSON file. Loading is forgiving: a missing or unreadable
//! file silently falls back to defaults so the app always starts.

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Board square color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardTheme {
    /// Tan and brown, the familiar tournament look.
    #[default]
    Classic,
    /// Muted greens.
    Forest,
    /// Cool grays.
    Slate,
}

impl BoardTheme {
    /// `(light, dark)` square colors.
    pub fn colors(self) -> (Color, Color) {
        match self {
            BoardTheme::Classic => (Color::Rgb(240, 217, 181), Color::Rgb(181, 136, 99)),
            BoardTheme::Forest => (Color::Rgb(238, 238, 210), Color::Rgb(118, 150, 86)),
            BoardTheme::Slate => (Color::Rgb(200, 203, 210), Color::Rgb(108, 117, 133)),
        }
    }

    /// Advances to the next theme.
    pub fn cycle(self) -> Self {
        match self {
            BoardTheme::Classic => BoardTheme::Forest,
            BoardTheme::Forest => BoardTheme::Slate,
            BoardTheme::Slate => BoardTheme::Classic,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            BoardTheme::Classic => "Classic",
            BoardTheme::Forest => "Forest",
            BoardTheme::Slate => "Slate",
        }
    }
}

/// How pieces are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceStyle {
    /// Chess glyphs (♞).
    #[default]
    Unicode,
    /// ASCII letters (N/n).
    Letters,
}

impl PieceStyle {
    /// Toggles between the two styles.
    pub fn cycle(self) -> Self {
        match self {
            PieceStyle::Unicode => PieceStyle::Letters,
            PieceStyle::Letters => PieceStyle::Unicode,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PieceStyle::Unicode => "Unicode",
            PieceStyle::Letters => "Letters",
        }
    }
}

/// Highlight glow color choices for target squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlowColor {
    /// Green glow.
    Green,
    /// Cyan glow.
    Cyan,
    /// Magenta glow.
    Magenta,
    /// Yellow glow.
    Yellow,
    /// Red glow.
    Red,
}

impl GlowColor {
    /// The terminal color for this glow.
    pub fn color(self) -> Color {
        match self {
            GlowColor::Green => Color::Green,
            GlowColor::Cyan => Color::Cyan,
            GlowColor::Magenta => Color::Magenta,
            GlowColor::Yellow => Color::Yellow,
            GlowColor::Red => Color::Red,
        }
    }

    /// Advances to the next color.
    pub fn cycle(self) -> Self {
        match self {
            GlowColor::Green => GlowColor::Cyan,
            GlowColor::Cyan => GlowColor::Magenta,
            GlowColor::Magenta => GlowColor::Yellow,
            GlowColor::Yellow => GlowColor::Red,
            GlowColor::Red => GlowColor::Green,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            GlowColor::Green => "Green",
            GlowColor::Cyan => "Cyan",
            GlowColor::Magenta => "Magenta",
            GlowColor::Yellow => "Yellow",
            GlowColor::Red => "Red",
        }
    }
}

/// User-configurable display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Board square color scheme.
    pub board_theme: BoardTheme,
    /// Piece rendering style.
    pub piece_style: PieceStyle,
    /// Glow color for quiet-move targets.
    pub move_glow: GlowColor,
    /// Glow color for attack targets.
    pub attack_glow: GlowColor,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            board_theme: BoardTheme::default(),
            piece_style: PieceStyle::default(),
            move_glow: GlowColor::Green,
            attack_glow: GlowColor::Red,
        }
    }
}

impl Preferences {
    /// Loads preferences from `path`, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(prefs) => {
                    debug!(path = %path.display(), "loaded preferences");
                    prefs
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed preferences, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Saves preferences to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("serializing preferences")?;
        std::fs::write(path, text)
            .with_context(|| format!("writing preferences to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("nonexistent.json"));
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Preferences::load(&path), Preferences::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let prefs = Preferences {
            board_theme: BoardTheme::Forest,
            piece_style: PieceStyle::Letters,
            move_glow: GlowColor::Cyan,
            attack_glow: GlowColor::Magenta,
        };
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(&path), prefs);
    }

    #[test]
    fn test_cycles_visit_every_option() {
        let mut theme = BoardTheme::Classic;
        for _ in 0..3 {
            theme = theme.cycle();
        }
        assert_eq!(theme, BoardTheme::Classic);

        let mut glow = GlowColor::Green;
        for _ in 0..5 {
            glow = glow.cycle();
        }
        assert_eq!(glow, GlowColor::Green);
    }
}
