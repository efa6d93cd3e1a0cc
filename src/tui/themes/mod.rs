//! Theme colors for the admin console
//!
//! Visual styling is not configurable; the framework only needs a consistent
//! set of semantic colors and a few derived styles.

use ratatui::style::{Color, Modifier, Style};

/// Theme represents a complete visual style configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Primary brand colors
    pub primary: Color,
    pub accent: Color,

    // Background colors with semantic naming
    pub bg_base: Color,
    pub bg_subtle: Color,
    pub bg_overlay: Color,

    // Foreground colors for text and UI elements
    pub fg_base: Color,
    pub fg_muted: Color,
    pub fg_subtle: Color,
    pub fg_selected: Color,

    // Border colors
    pub border: Color,
    pub border_focus: Color,

    // Status and semantic colors
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "folio-dark".to_string(),
            primary: Color::Rgb(108, 80, 255),
            accent: Color::Rgb(0, 200, 190),
            bg_base: Color::Rgb(24, 24, 30),
            bg_subtle: Color::Rgb(36, 36, 46),
            bg_overlay: Color::Rgb(12, 12, 16),
            fg_base: Color::Rgb(220, 220, 228),
            fg_muted: Color::Rgb(150, 150, 165),
            fg_subtle: Color::Rgb(100, 100, 115),
            fg_selected: Color::White,
            border: Color::Rgb(70, 70, 90),
            border_focus: Color::Rgb(108, 80, 255),
            success: Color::Rgb(70, 200, 120),
            error: Color::Rgb(235, 80, 90),
            warning: Color::Rgb(240, 180, 60),
            info: Color::Rgb(90, 160, 240),
        }
    }
}

impl Theme {
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg_base).bg(self.bg_base)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.fg_base)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focus)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.fg_selected)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style applied to every cell behind a modal dialog
    pub fn backdrop_style(&self) -> Style {
        Style::default()
            .bg(self.bg_overlay)
            .add_modifier(Modifier::DIM)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default().fg(self.fg_muted).bg(self.bg_subtle)
    }
}
