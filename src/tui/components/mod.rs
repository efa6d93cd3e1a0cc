pub mod dialogs;
pub mod dropdown;
pub mod overlay;
pub mod spinner;

use crate::tui::themes::Theme;
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{buffer::Buffer, layout::Rect};
use std::time::Instant;

/// Base trait for all UI components
///
/// Components draw into a [`Buffer`] rather than a frame so the same content
/// can be rendered either in place or inside an overlay container.
#[async_trait]
pub trait Component: Send + Sync {
    /// Handle keyboard input
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        let _ = event;
        Ok(())
    }

    /// Handle mouse input
    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        let _ = event;
        Ok(())
    }

    /// Handle a terminal resize
    async fn handle_resize(&mut self, viewport: Rect) -> Result<()> {
        let _ = viewport;
        Ok(())
    }

    /// Handle periodic updates
    async fn tick(&mut self) -> Result<()> {
        self.advance(Instant::now());
        Ok(())
    }

    /// Run any timers that are due at `now`
    fn advance(&mut self, now: Instant) {
        let _ = now;
    }

    /// Close floating panels and drop pending timers right away; the
    /// component is about to stop being drawn
    fn dismiss(&mut self) {}

    /// A pointer-down landed on something outside this component that its
    /// owner handled itself; floating panels should treat it as an outside click
    fn pointer_down_elsewhere(&mut self, column: u16, row: u16) {
        let _ = (column, row);
    }

    /// Render the component
    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme);

    /// Whether a screen position belongs to this component, including any
    /// floating panel it renders outside its own area
    fn owns_point(&self, column: u16, row: u16) -> bool {
        let _ = (column, row);
        false
    }

    /// Get component dimensions
    fn size(&self) -> Rect;

    /// Set component dimensions
    fn set_size(&mut self, size: Rect);

    /// Check if component has focus
    fn has_focus(&self) -> bool {
        false
    }

    /// Set component focus
    fn set_focus(&mut self, focus: bool) {
        let _ = focus;
    }

    /// Check if component is visible
    fn is_visible(&self) -> bool {
        true
    }
}

/// Base component state
#[derive(Debug, Clone)]
pub struct ComponentState {
    pub size: Rect,
    pub has_focus: bool,
    pub is_visible: bool,
}

impl Default for ComponentState {
    fn default() -> Self {
        Self {
            size: Rect::default(),
            has_focus: false,
            is_visible: true,
        }
    }
}

impl ComponentState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Simple text block, used as default dialog content and in tests
pub struct TextPanel {
    state: ComponentState,
    lines: Vec<String>,
}

impl TextPanel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: ComponentState::new(),
            lines: text.into().lines().map(str::to_string).collect(),
        }
    }
}

#[async_trait]
impl Component for TextPanel {
    async fn handle_key_event(&mut self, _event: KeyEvent) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        use ratatui::widgets::{Paragraph, Widget, Wrap};

        self.state.size = area;
        Paragraph::new(self.lines.join("\n"))
            .style(theme.text_style())
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn size(&self) -> Rect {
        self.state.size
    }

    fn set_size(&mut self, size: Rect) {
        self.state.size = size;
    }

    fn has_focus(&self) -> bool {
        self.state.has_focus
    }

    fn set_focus(&mut self, focus: bool) {
        self.state.has_focus = focus;
    }
}
