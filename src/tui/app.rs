use crate::config::Config;
use crate::tui::{
    context::UiContext,
    events::Event,
    keys::KeyMap,
    listeners::ListenerKind,
    pages::{skills::SkillsPage, Page},
    themes::Theme,
    Frame,
};
use anyhow::Result;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Paragraph, Widget},
};
use tracing::debug;

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Current application dimensions
    pub size: Rect,

    /// Key mappings for the application
    pub key_map: KeyMap,

    /// Overlay root, listener registry and settings shared with components
    pub context: UiContext,

    /// Page currently on screen
    pub page: Box<dyn Page>,

    /// Current theme for styling
    pub theme: Theme,

    /// Status message to display
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance over `viewport`
    pub fn new(config: &Config, viewport: Rect) -> Self {
        let context = UiContext::mounted(config.ui.clone(), viewport);
        let page = Box::new(SkillsPage::new(&context));

        Self {
            should_quit: false,
            size: viewport,
            key_map: KeyMap::default(),
            context,
            page,
            theme: Theme::default(),
            status_message: None,
        }
    }

    /// Handle incoming events; returns true once the app should exit
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => {
                if self.key_map.should_quit(&key_event) {
                    self.should_quit = true;
                    return Ok(true);
                }
                self.status_message = None;
                self.page.handle_key_event(key_event).await?;
            }

            Event::Mouse(mouse_event) => {
                if !self.context.settings.mouse_enabled {
                    return Ok(self.should_quit);
                }
                if self.context.overlays.captures_pointer() {
                    self.page.handle_overlay_mouse_event(mouse_event).await?;
                } else {
                    self.page.handle_mouse_event(mouse_event).await?;
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
                self.context.overlays.mount(self.size);
                self.page.handle_resize(self.size).await?;
            }

            Event::Tick => self.page.tick().await?,

            Event::StatusMessage(message) => {
                self.status_message = Some(message);
            }

            Event::Quit => {
                debug!("Quit requested");
                self.should_quit = true;
            }
        }

        Ok(self.should_quit)
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.size();
        self.draw(frame.buffer_mut(), area);
    }

    /// Draw the page, the status bar and every overlay layer into `buf`
    pub fn draw(&mut self, buf: &mut Buffer, area: Rect) {
        self.size = area;
        self.context.overlays.begin_frame(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Main content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.page.render(buf, chunks[0], &self.theme);
        self.render_status_bar(buf, chunks[1]);

        self.context.overlays.composite(buf);
    }

    /// Render the status bar
    fn render_status_bar(&self, buf: &mut Buffer, area: Rect) {
        let message = self
            .status_message
            .as_deref()
            .or_else(|| self.page.status())
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.page
                    .help_text()
                    .iter()
                    .map(|(key, action)| format!("{} {}", key, action))
                    .collect::<Vec<_>>()
                    .join(" · ")
            });

        let listeners = &self.context.listeners;
        let status_text = format!(
            "{} | {} | layers {} · pointer {} · resize {} · scroll {} · keys {}",
            self.page.title(),
            message,
            self.context.overlays.layer_count(),
            listeners.count(ListenerKind::PointerDown),
            listeners.count(ListenerKind::Resize),
            listeners.count(ListenerKind::Scroll),
            listeners.count(ListenerKind::Keyboard),
        );

        Paragraph::new(status_text)
            .style(self.theme.status_bar_style())
            .render(area, buf);
    }
}
