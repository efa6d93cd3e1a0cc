pub mod skills;

use crate::tui::themes::Theme;
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{buffer::Buffer, layout::Rect};
use std::time::Instant;

/// Page identifier type
pub type PageId = String;

/// Base trait for all pages
#[async_trait]
pub trait Page: Send + Sync {
    /// Get the page ID
    fn id(&self) -> &PageId;

    /// Get the page title
    fn title(&self) -> &str;

    /// Handle keyboard input
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()>;

    /// Handle mouse input aimed at the page itself
    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()>;

    /// Handle mouse input while an overlay holds the pointer; only the
    /// overlays the page opened may see it
    async fn handle_overlay_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        let _ = event;
        Ok(())
    }

    /// Called when the page is resized
    async fn handle_resize(&mut self, viewport: Rect) -> Result<()> {
        let _ = viewport;
        Ok(())
    }

    /// Handle periodic updates
    async fn tick(&mut self) -> Result<()> {
        self.advance(Instant::now());
        Ok(())
    }

    /// Run timers and drain pending events as of `now`
    fn advance(&mut self, now: Instant);

    /// Render the page
    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme);

    /// Latest status line, if the page has one
    fn status(&self) -> Option<&str> {
        None
    }

    /// Get page-specific help text
    fn help_text(&self) -> Vec<(&str, &str)> {
        vec![]
    }
}
