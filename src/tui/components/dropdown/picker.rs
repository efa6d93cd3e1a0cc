//! Text input with an attached candidate dropdown

use super::{AnchoredDropdown, DropdownCandidate, DropdownConfig, PointerTarget};
use crate::tui::{
    components::{Component, ComponentState},
    context::UiContext,
    themes::Theme,
    utils::layout::contains,
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::debug;

/// Events emitted by form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The committed value changed, by typing or by picking a candidate
    Changed { field: String, value: String },
}

/// Labelled input whose candidates float below it
pub struct PickerField {
    state: ComponentState,
    name: String,
    label: String,
    placeholder: String,
    value: String,
    cursor_position: usize,
    dropdown: AnchoredDropdown,
    event_sender: Option<mpsc::UnboundedSender<FieldEvent>>,
}

impl PickerField {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        config: DropdownConfig,
        context: &UiContext,
    ) -> Self {
        Self {
            state: ComponentState::new(),
            name: name.into(),
            label: label.into(),
            placeholder: "Type to search...".to_string(),
            value: String::new(),
            cursor_position: 0,
            dropdown: AnchoredDropdown::new(config, context),
            event_sender: None,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<DropdownCandidate>) -> Self {
        self.dropdown.set_candidates(candidates);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set event sender for value changes
    pub fn with_event_sender(mut self, sender: mpsc::UnboundedSender<FieldEvent>) -> Self {
        self.event_sender = Some(sender);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn dropdown(&self) -> &AnchoredDropdown {
        &self.dropdown
    }

    pub fn set_candidates(&mut self, candidates: Vec<DropdownCandidate>) {
        self.dropdown.set_candidates(candidates);
    }

    /// Give the field focus; opens the panel when there is something to show
    pub fn focus(&mut self) {
        self.state.has_focus = true;
        self.dropdown.on_focus();
    }

    /// Take focus away; the panel closes after the grace period
    pub fn blur_at(&mut self, now: Instant) {
        self.state.has_focus = false;
        self.dropdown.on_blur(now);
    }

    /// Replace the whole value as if the user typed it
    pub fn set_text(&mut self, text: &str) {
        self.cursor_position = text.chars().count();
        self.edit(text.to_string());
    }

    /// Pick a candidate from the display list by index
    pub fn pick(&mut self, index: usize) -> bool {
        match self.dropdown.select(index) {
            Some(name) => {
                self.cursor_position = name.chars().count();
                self.commit_value(name);
                self.state.has_focus = true;
                true
            }
            None => false,
        }
    }

    fn edit(&mut self, value: String) {
        self.commit_value(value);
        let query = self.value.clone();
        self.dropdown.on_input(&query);
    }

    fn commit_value(&mut self, value: String) {
        self.value = value;
        if let Some(sender) = &self.event_sender {
            let _ = sender.send(FieldEvent::Changed {
                field: self.name.clone(),
                value: self.value.clone(),
            });
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    fn insert_char(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor_position);
        let mut value = self.value.clone();
        value.insert(offset, ch);
        self.cursor_position += 1;
        self.edit(value);
    }

    fn delete_previous_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let offset = self.byte_offset(self.cursor_position);
        let mut value = self.value.clone();
        value.remove(offset);
        self.edit(value);
    }

    fn delete_next_char(&mut self) {
        if self.cursor_position >= self.value.chars().count() {
            return;
        }
        let offset = self.byte_offset(self.cursor_position);
        let mut value = self.value.clone();
        value.remove(offset);
        self.edit(value);
    }

    fn input_area(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y.saturating_add(1),
            width: area.width,
            height: area.height.saturating_sub(1).min(3),
        }
    }

    fn display_line(&self, theme: &Theme) -> Line<'_> {
        if self.value.is_empty() && !self.state.has_focus {
            return Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default()
                    .fg(theme.fg_subtle)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        let cursor_style = Style::default().bg(theme.accent).fg(theme.bg_base);
        if !self.state.has_focus {
            return Line::from(Span::styled(self.value.as_str(), theme.text_style()));
        }

        let offset = self.byte_offset(self.cursor_position);
        let (before, rest) = self.value.split_at(offset);
        let mut spans = vec![Span::styled(before, theme.text_style())];
        match rest.chars().next() {
            Some(ch) => {
                let width = ch.len_utf8();
                spans.push(Span::styled(&rest[..width], cursor_style));
                spans.push(Span::styled(&rest[width..], theme.text_style()));
            }
            None => spans.push(Span::styled(" ", cursor_style)),
        }
        Line::from(spans)
    }
}

#[async_trait]
impl Component for PickerField {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if !self.state.has_focus {
            return Ok(());
        }

        let panel_open = self.dropdown.is_visible();
        match event.code {
            KeyCode::Up if panel_open => self.dropdown.move_up(),
            KeyCode::Down if panel_open => self.dropdown.move_down(),
            KeyCode::Down => self.dropdown.on_focus(),
            KeyCode::Enter | KeyCode::Tab if panel_open => {
                let index = self.dropdown.highlighted();
                self.pick(index);
            }
            KeyCode::Esc if panel_open => self.dropdown.hide(),
            KeyCode::Char(ch)
                if !event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Backspace => self.delete_previous_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.cursor_position = self.cursor_position.saturating_sub(1),
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.value.chars().count());
            }
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.value.chars().count(),
            _ => {}
        }

        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let now = Instant::now();
                match self.dropdown.handle_pointer_down(event.column, event.row) {
                    PointerTarget::Panel(Some(index)) => {
                        self.pick(index);
                    }
                    PointerTarget::Panel(None) => {}
                    PointerTarget::Anchor => {
                        if !self.state.has_focus {
                            self.focus();
                        }
                    }
                    PointerTarget::Outside | PointerTarget::Ignored => {
                        if contains(self.state.size, event.column, event.row) {
                            self.focus();
                        } else if self.state.has_focus {
                            debug!("Field '{}' lost focus to a click", self.name);
                            self.blur_at(now);
                        }
                    }
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => self.dropdown.handle_scroll(),
            _ => {}
        }
        Ok(())
    }

    async fn handle_resize(&mut self, viewport: Rect) -> Result<()> {
        self.dropdown.handle_resize(viewport);
        Ok(())
    }

    fn advance(&mut self, now: Instant) {
        self.dropdown.advance(now);
    }

    fn dismiss(&mut self) {
        self.state.has_focus = false;
        self.dropdown.hide();
    }

    fn pointer_down_elsewhere(&mut self, column: u16, row: u16) {
        if self.dropdown.handle_pointer_down(column, row) == PointerTarget::Outside {
            debug!("Field '{}' closed its panel on an outside click", self.name);
        }
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        self.state.size = area;
        if area.height == 0 || area.width == 0 {
            self.dropdown.clear_anchor();
            return;
        }

        let label_area = Rect { height: 1, ..area };
        Paragraph::new(Line::from(Span::styled(
            self.label.as_str(),
            theme.muted_style().add_modifier(Modifier::BOLD),
        )))
        .render(label_area, buf);

        let input_area = Self::input_area(area);
        if input_area.height > 0 {
            Paragraph::new(self.display_line(theme))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(theme.border_style(self.state.has_focus)),
                )
                .render(input_area, buf);
        }

        self.dropdown.set_anchor(input_area, area);
        let clip = buf.area;
        self.dropdown.render(buf, clip, theme);
    }

    fn owns_point(&self, column: u16, row: u16) -> bool {
        contains(self.state.size, column, row) || self.dropdown.owns_point(column, row)
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
        if focus == self.state.has_focus {
            return;
        }
        if focus {
            self.focus();
        } else {
            self.blur_at(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiSettings;
    use std::time::Duration;

    fn context() -> UiContext {
        UiContext::mounted(UiSettings::default(), Rect::new(0, 0, 80, 24))
    }

    fn catalog() -> Vec<DropdownCandidate> {
        vec![
            DropdownCandidate::new("React").with_category("frontend"),
            DropdownCandidate::new("Redux").with_category("frontend"),
            DropdownCandidate::new("PostgreSQL").with_category("database"),
            DropdownCandidate::new("SQLite").with_category("database"),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn field(context: &UiContext) -> (PickerField, mpsc::UnboundedReceiver<FieldEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut field = PickerField::new("skill", "Skill", DropdownConfig::portal(&context.settings), context)
            .with_candidates(catalog())
            .with_event_sender(tx);

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        field.render(&mut buf, Rect::new(5, 2, 30, 4), &Theme::default());
        (field, rx)
    }

    #[tokio::test]
    async fn test_typing_commits_and_filters() {
        let context = context();
        let (mut field, mut rx) = field(&context);
        field.focus();

        field.handle_key_event(key(KeyCode::Char('s'))).await.unwrap();
        field.handle_key_event(key(KeyCode::Char('q'))).await.unwrap();

        assert_eq!(field.value(), "sq");
        assert_eq!(field.dropdown().display_names(), vec!["PostgreSQL", "SQLite"]);
        assert_eq!(
            rx.try_recv().unwrap(),
            FieldEvent::Changed { field: "skill".to_string(), value: "s".to_string() }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            FieldEvent::Changed { field: "skill".to_string(), value: "sq".to_string() }
        );
    }

    #[tokio::test]
    async fn test_enter_picks_highlighted_candidate() {
        let context = context();
        let (mut field, mut rx) = field(&context);
        field.focus();
        field.set_text("re");
        let _ = rx.try_recv();

        field.handle_key_event(key(KeyCode::Down)).await.unwrap();
        field.handle_key_event(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(field.value(), "Redux");
        assert!(!field.dropdown().is_visible());
        assert!(field.has_focus());
        assert_eq!(
            rx.try_recv().unwrap(),
            FieldEvent::Changed { field: "skill".to_string(), value: "Redux".to_string() }
        );
    }

    #[tokio::test]
    async fn test_click_on_panel_selects() {
        let context = context();
        let (mut field, _rx) = field(&context);
        field.focus();
        field.set_text("sql");

        // Input box spans rows 3..6, so the panel border sits on row 6.
        assert!(field.owns_point(8, 7));
        field.handle_mouse_event(click(8, 8)).await.unwrap();
        assert_eq!(field.value(), "SQLite");
        assert!(!field.dropdown().is_visible());
    }

    #[tokio::test]
    async fn test_outside_click_closes_and_blurs() {
        let context = context();
        let (mut field, _rx) = field(&context);
        field.focus();
        field.set_text("re");
        assert!(field.dropdown().is_visible());

        field.handle_mouse_event(click(70, 20)).await.unwrap();
        assert!(!field.dropdown().is_visible());
        assert!(!field.has_focus());
        assert_eq!(context.listeners.total(), 0);
    }

    #[tokio::test]
    async fn test_blur_keeps_panel_through_grace_period() {
        let context = context();
        let (mut field, _rx) = field(&context);
        let start = Instant::now();
        field.focus();
        assert!(field.dropdown().is_visible());

        field.blur_at(start);
        field.advance(start + Duration::from_millis(50));
        assert!(field.dropdown().is_visible());
        field.advance(start + Duration::from_millis(200));
        assert!(!field.dropdown().is_visible());
    }

    #[tokio::test]
    async fn test_pick_leaves_query_matching_value() {
        let context = context();
        let (mut field, _rx) = field(&context);
        field.focus();
        field.set_text("re");
        assert_eq!(field.dropdown().display_names(), vec!["React", "Redux", "PostgreSQL"]);

        assert!(field.pick(1));
        assert_eq!(field.value(), "Redux");
        assert_eq!(field.dropdown().query(), field.value());
        assert!(!field.dropdown().is_visible());

        field.handle_key_event(key(KeyCode::Down)).await.unwrap();
        assert!(field.dropdown().is_visible());
        assert_eq!(field.dropdown().display_names(), vec!["Redux"]);
    }

    #[tokio::test]
    async fn test_cursor_editing() {
        let context = context();
        let (mut field, _rx) = field(&context);
        field.focus();
        field.set_text("Rct");

        field.handle_key_event(key(KeyCode::Left)).await.unwrap();
        field.handle_key_event(key(KeyCode::Left)).await.unwrap();
        field.handle_key_event(key(KeyCode::Char('e'))).await.unwrap();
        field.handle_key_event(key(KeyCode::Char('a'))).await.unwrap();
        assert_eq!(field.value(), "React");

        field.handle_key_event(key(KeyCode::End)).await.unwrap();
        field.handle_key_event(key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(field.value(), "Reac");

        field.handle_key_event(key(KeyCode::Home)).await.unwrap();
        field.handle_key_event(key(KeyCode::Delete)).await.unwrap();
        assert_eq!(field.value(), "eac");
    }

    #[tokio::test]
    async fn test_unfocused_field_ignores_keys() {
        let context = context();
        let (mut field, mut rx) = field(&context);

        field.handle_key_event(key(KeyCode::Char('x'))).await.unwrap();
        assert_eq!(field.value(), "");
        assert!(rx.try_recv().is_err());
    }
}
