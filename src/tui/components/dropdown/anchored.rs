//! Floating candidate panel anchored below a text input

use super::{filter_candidates, AnchorPosition, DropdownCandidate, DropdownConfig, DropdownMode};
use crate::tui::{
    components::overlay::OverlayHost,
    context::UiContext,
    listeners::{ListenerHandle, ListenerKind},
    themes::Theme,
    timer::DelayedAction,
    utils::layout::contains,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Listeners held while the panel is open
const OPEN_LISTENERS: [ListenerKind; 3] = [
    ListenerKind::PointerDown,
    ListenerKind::Resize,
    ListenerKind::Scroll,
];

/// Where a pointer-down landed, from the dropdown's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The panel is closed and nothing is listening
    Ignored,
    /// Inside the panel; the candidate row under the pointer, if any
    Panel(Option<usize>),
    /// Inside the anchor or its wrapper
    Anchor,
    /// Anywhere else; the panel has been closed
    Outside,
}

/// Search-as-you-type candidate panel
pub struct AnchoredDropdown {
    config: DropdownConfig,
    candidates: Vec<DropdownCandidate>,
    query: String,
    display: Vec<DropdownCandidate>,
    visible: bool,
    highlighted: usize,
    anchor: Option<Rect>,
    wrapper: Option<Rect>,
    position: Option<AnchorPosition>,
    viewport: Rect,
    clip: Option<Rect>,
    blur: DelayedAction,
    host: Option<OverlayHost>,
    listeners: ListenerHandle,
}

impl AnchoredDropdown {
    pub fn new(config: DropdownConfig, context: &UiContext) -> Self {
        let host = match config.mode {
            DropdownMode::Portal => Some(OverlayHost::new(context.overlays.clone(), "dropdown")),
            DropdownMode::Inline => None,
        };

        Self {
            blur: DelayedAction::new("dropdown-blur", config.blur_grace),
            config,
            candidates: Vec::new(),
            query: String::new(),
            display: Vec::new(),
            visible: false,
            highlighted: 0,
            anchor: None,
            wrapper: None,
            position: None,
            viewport: context.overlays.viewport(),
            clip: None,
            host,
            listeners: context.listeners.handle(),
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<DropdownCandidate>) -> Self {
        self.set_candidates(candidates);
        self
    }

    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The capped, filtered list currently on display
    pub fn display(&self) -> &[DropdownCandidate] {
        &self.display
    }

    pub fn display_names(&self) -> Vec<&str> {
        self.display.iter().map(|candidate| candidate.name.as_str()).collect()
    }

    pub fn position(&self) -> Option<AnchorPosition> {
        self.position
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_blur_pending(&self) -> bool {
        self.blur.is_pending()
    }

    /// Whether the panel currently holds a listener of `kind`
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.is_attached(kind)
    }

    /// Replace the candidate source
    pub fn set_candidates(&mut self, candidates: Vec<DropdownCandidate>) {
        self.candidates = candidates;
        self.refilter();
        if self.visible && self.display.is_empty() {
            self.hide();
        }
    }

    /// Change the active category filter
    pub fn set_category(&mut self, category: Option<String>) {
        self.config.category = category;
        self.refilter();
        if self.visible && self.display.is_empty() {
            self.hide();
        }
    }

    /// Record the anchor's on-screen geometry and the wrapper around it
    pub fn set_anchor(&mut self, anchor: Rect, wrapper: Rect) {
        let changed = self.anchor != Some(anchor);
        self.anchor = Some(anchor);
        self.wrapper = Some(wrapper);
        if changed && self.visible {
            self.reposition();
        }
    }

    /// Forget the anchor geometry (the anchor is no longer drawn)
    pub fn clear_anchor(&mut self) {
        self.anchor = None;
        self.wrapper = None;
    }

    /// The anchor's text changed
    pub fn on_input(&mut self, text: &str) {
        self.query = text.to_string();
        self.refilter();

        if !self.query.is_empty() && !self.display.is_empty() {
            self.show();
        } else {
            self.hide();
        }
    }

    /// The anchor gained focus
    pub fn on_focus(&mut self) {
        self.blur.cancel();
        if self.candidates.is_empty() {
            return;
        }
        self.refilter();
        if !self.display.is_empty() {
            self.show();
        }
    }

    /// The anchor lost focus; close after the grace period
    pub fn on_blur(&mut self, now: Instant) {
        if self.visible {
            self.blur.schedule(now);
        }
    }

    /// Run the blur timer
    pub fn advance(&mut self, now: Instant) {
        if self.blur.fire_if_due(now) {
            debug!("Closing dropdown after blur");
            self.hide();
        }
    }

    pub fn handle_resize(&mut self, viewport: Rect) {
        self.viewport = viewport;
        if self.listeners.is_attached(ListenerKind::Resize) {
            self.reposition();
        }
    }

    pub fn handle_scroll(&mut self) {
        if self.listeners.is_attached(ListenerKind::Scroll) {
            self.reposition();
        }
    }

    /// Route a pointer-down anywhere on screen
    pub fn handle_pointer_down(&mut self, column: u16, row: u16) -> PointerTarget {
        if !self.listeners.is_attached(ListenerKind::PointerDown) {
            return PointerTarget::Ignored;
        }

        if let Some(panel) = self.panel_rect() {
            if contains(panel, column, row) {
                return PointerTarget::Panel(self.row_at(panel, row));
            }
        }

        let in_anchor = self.anchor.is_some_and(|anchor| contains(anchor, column, row));
        let in_wrapper = self.wrapper.is_some_and(|wrapper| contains(wrapper, column, row));
        if in_anchor || in_wrapper {
            return PointerTarget::Anchor;
        }

        debug!("Pointer-down outside dropdown at ({}, {})", column, row);
        self.hide();
        PointerTarget::Outside
    }

    /// Whether a screen position lies on the open panel
    pub fn owns_point(&self, column: u16, row: u16) -> bool {
        self.visible
            && self
                .panel_rect()
                .is_some_and(|panel| contains(panel, column, row))
    }

    pub fn move_up(&mut self) {
        if self.display.is_empty() {
            return;
        }
        if self.highlighted > 0 {
            self.highlighted -= 1;
        } else {
            self.highlighted = self.display.len() - 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.display.is_empty() {
            return;
        }
        if self.highlighted + 1 < self.display.len() {
            self.highlighted += 1;
        } else {
            self.highlighted = 0;
        }
    }

    /// Pick the candidate at `index` of the display list.
    ///
    /// Returns the name to write back to the anchor, or `None` when nothing
    /// selectable is there. A successful selection closes the panel.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let candidate = self.display.get(index)?;
        if !candidate.is_selectable() {
            warn!("Ignoring selection of blank candidate at index {}", index);
            return None;
        }

        let name = candidate.name.clone();
        debug!("Selected candidate '{}'", name);
        self.hide();
        // The anchor now reads `name`; filter by it from here on.
        self.query = name.clone();
        self.refilter();
        Some(name)
    }

    pub fn select_highlighted(&mut self) -> Option<String> {
        self.select(self.highlighted)
    }

    /// Close the panel and release everything it holds
    pub fn hide(&mut self) {
        self.blur.cancel();
        if !self.visible {
            return;
        }
        self.visible = false;
        self.position = None;
        self.listeners.detach_all();
        if let Some(host) = &mut self.host {
            host.deactivate();
        }
        trace!("dropdown hidden");
    }

    fn show(&mut self) {
        self.blur.cancel();
        if !self.visible {
            self.visible = true;
            self.highlighted = 0;
            self.listeners.attach_all(&OPEN_LISTENERS);
            if let Some(host) = &mut self.host {
                // A missing root is logged by the host; the panel just won't draw.
                let _ = host.activate();
            }
            trace!("dropdown shown with {} candidates", self.display.len());
        }
        self.reposition();
    }

    fn refilter(&mut self) {
        self.display = filter_candidates(
            &self.candidates,
            &self.query,
            self.config.category.as_deref(),
            self.config.cap,
        )
        .into_iter()
        .cloned()
        .collect();

        if self.highlighted >= self.display.len() {
            self.highlighted = 0;
        }
    }

    fn reposition(&mut self) {
        match self.anchor {
            Some(anchor) => {
                self.position = Some(AnchorPosition::below(
                    anchor,
                    self.config.gap,
                    self.config.min_panel_width,
                ));
            }
            None => trace!("dropdown anchor not mounted; position unchanged"),
        }
    }

    fn panel_rect(&self) -> Option<Rect> {
        let position = self.position?;
        let rows = u16::try_from(self.display.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let mut panel = position.panel_rect(rows, self.viewport);
        if let (DropdownMode::Inline, Some(clip)) = (self.config.mode, self.clip) {
            panel = panel.intersection(clip);
        }
        (panel.width > 0 && panel.height > 0).then_some(panel)
    }

    fn row_at(&self, panel: Rect, row: u16) -> Option<usize> {
        if row <= panel.y || row + 1 >= panel.bottom() {
            return None;
        }
        let index = (row - panel.y - 1) as usize;
        (index < self.display.len()).then_some(index)
    }

    /// Draw the panel. Inline panels go into `buf`, clipped to `clip`;
    /// portal panels go into the dropdown's own overlay container.
    pub fn render(&mut self, buf: &mut Buffer, clip: Rect, theme: &Theme) {
        self.clip = Some(clip);
        if buf.area.width > 0 && self.viewport.width == 0 {
            self.viewport = buf.area;
        }
        if !self.visible {
            return;
        }
        self.reposition();

        let Some(panel) = self.panel_rect() else {
            return;
        };

        let list = self.panel_list(theme);
        let mut state = ListState::default();
        state.select(Some(self.highlighted));

        match (&self.host, self.config.mode) {
            (Some(host), DropdownMode::Portal) => {
                host.draw(|surface| {
                    surface.render_widget(Clear, panel);
                    surface.render_stateful_widget(list, panel, &mut state);
                });
            }
            _ => {
                Clear.render(panel, buf);
                StatefulWidget::render(list, panel, buf, &mut state);
            }
        }
    }

    fn panel_list(&self, theme: &Theme) -> List<'_> {
        let items: Vec<ListItem> = self
            .display
            .iter()
            .map(|candidate| self.candidate_item(candidate, theme))
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme.border_style(true))
                    .style(Style::default().bg(theme.bg_subtle)),
            )
            .highlight_style(theme.selected_style())
    }

    fn candidate_item<'a>(&self, candidate: &'a DropdownCandidate, theme: &Theme) -> ListItem<'a> {
        let mut spans = Vec::new();

        if let Some(icon) = &candidate.icon {
            spans.push(Span::styled(format!("{} ", icon), Style::default().fg(theme.accent)));
        }
        spans.extend(highlight_match(&candidate.name, &self.query, theme));
        if let Some(category) = &candidate.category {
            spans.push(Span::styled(
                format!("  {}", category),
                Style::default()
                    .fg(theme.fg_subtle)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        ListItem::new(Line::from(spans)).style(theme.text_style())
    }
}

/// Split `text` so the first case-insensitive occurrence of `query` is emphasised
fn highlight_match<'a>(text: &'a str, query: &str, theme: &Theme) -> Vec<Span<'a>> {
    let lower = text.to_lowercase();
    let needle = query.to_lowercase();

    // Byte offsets only line up when lowercasing kept every length.
    let found = if needle.is_empty() || lower.len() != text.len() {
        None
    } else {
        lower.find(&needle)
    };

    match found {
        Some(start) if text.is_char_boundary(start) && text.is_char_boundary(start + needle.len()) => {
            let end = start + needle.len();
            vec![
                Span::raw(&text[..start]),
                Span::styled(
                    &text[start..end],
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(&text[end..]),
            ]
        }
        _ => vec![Span::raw(text)],
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

    fn frameworks() -> Vec<DropdownCandidate> {
        vec![
            DropdownCandidate::new("React").with_category("frontend"),
            DropdownCandidate::new("Redux").with_category("frontend"),
            DropdownCandidate::new("Vue").with_category("frontend"),
            DropdownCandidate::new("Rust").with_category("backend"),
        ]
    }

    fn dropdown(context: &UiContext) -> AnchoredDropdown {
        let mut dropdown = AnchoredDropdown::new(DropdownConfig::portal(&context.settings), context)
            .with_candidates(frameworks());
        dropdown.set_anchor(Rect::new(10, 4, 30, 3), Rect::new(10, 3, 30, 4));
        dropdown
    }

    #[test]
    fn test_typing_opens_and_filters() {
        let context = context();
        let mut dropdown = dropdown(&context);

        dropdown.on_input("re");
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.display_names(), vec!["React", "Redux"]);

        dropdown.on_input("");
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn test_empty_result_hides_panel() {
        let context = context();
        let mut dropdown = dropdown(&context);

        dropdown.on_input("re");
        assert!(dropdown.is_visible());
        dropdown.on_input("zzz");
        assert!(!dropdown.is_visible());
        assert!(dropdown.display().is_empty());
    }

    #[test]
    fn test_focus_opens_with_existing_candidates() {
        let context = context();
        let mut dropdown = dropdown(&context);

        dropdown.on_focus();
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.display().len(), 4);

        let mut empty = AnchoredDropdown::new(DropdownConfig::default(), &context);
        empty.on_focus();
        assert!(!empty.is_visible());
    }

    #[test]
    fn test_category_filter() {
        let context = context();
        let mut dropdown = dropdown(&context);
        dropdown.set_category(Some("backend".to_string()));

        dropdown.on_input("r");
        assert_eq!(dropdown.display_names(), vec!["Rust"]);

        dropdown.set_category(Some("mobile".to_string()));
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn test_position_follows_anchor() {
        let context = context();
        let mut dropdown = dropdown(&context);
        dropdown.on_input("re");

        let position = dropdown.position().unwrap();
        assert_eq!(position.top, 7);
        assert_eq!(position.left, 10);
        assert_eq!(position.width, 30);

        dropdown.set_anchor(Rect::new(2, 10, 8, 1), Rect::new(2, 9, 8, 2));
        let position = dropdown.position().unwrap();
        assert_eq!(position.top, 11);
        assert_eq!(position.left, 2);
        assert_eq!(position.width, 24);
    }

    #[test]
    fn test_missing_anchor_skips_positioning() {
        let context = context();
        let mut dropdown = AnchoredDropdown::new(DropdownConfig::default(), &context)
            .with_candidates(frameworks());

        dropdown.on_input("re");
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.position(), None);
        dropdown.handle_scroll();
        assert_eq!(dropdown.position(), None);
        assert!(!dropdown.owns_point(0, 0));
    }

    #[test]
    fn test_listeners_scoped_to_open_state() {
        let context = context();
        let mut dropdown = dropdown(&context);
        assert_eq!(context.listeners.total(), 0);

        for _ in 0..3 {
            dropdown.on_input("re");
            dropdown.on_input("rea");
            assert_eq!(context.listeners.count(ListenerKind::PointerDown), 1);
            assert_eq!(context.listeners.count(ListenerKind::Scroll), 1);
            assert!(dropdown.is_listening(ListenerKind::Resize));
            dropdown.hide();
            assert!(!dropdown.is_listening(ListenerKind::Resize));
            assert_eq!(context.listeners.total(), 0);
        }

        dropdown.on_input("re");
        drop(dropdown);
        assert_eq!(context.listeners.total(), 0);
    }

    #[test]
    fn test_portal_container_lifecycle() {
        let context = context();
        let mut dropdown = dropdown(&context);

        dropdown.on_input("re");
        assert_eq!(context.overlays.layer_count(), 1);
        dropdown.on_input("");
        assert_eq!(context.overlays.layer_count(), 0);

        let mut inline = AnchoredDropdown::new(DropdownConfig::compact(&context.settings), &context)
            .with_candidates(frameworks());
        inline.on_input("re");
        assert!(inline.is_visible());
        assert_eq!(context.overlays.layer_count(), 0);
    }

    #[test]
    fn test_pointer_down_ownership() {
        let context = context();
        let mut dropdown = dropdown(&context);
        dropdown.on_input("re");

        // Panel starts at row 7: border, React, Redux, border.
        assert!(dropdown.owns_point(12, 8));
        assert_eq!(dropdown.handle_pointer_down(12, 8), PointerTarget::Panel(Some(0)));
        assert_eq!(dropdown.handle_pointer_down(12, 9), PointerTarget::Panel(Some(1)));
        assert_eq!(dropdown.handle_pointer_down(12, 7), PointerTarget::Panel(None));
        assert!(dropdown.is_visible());

        assert_eq!(dropdown.handle_pointer_down(12, 5), PointerTarget::Anchor);
        assert_eq!(dropdown.handle_pointer_down(12, 3), PointerTarget::Anchor);
        assert!(dropdown.is_visible());

        assert_eq!(dropdown.handle_pointer_down(70, 20), PointerTarget::Outside);
        assert!(!dropdown.is_visible());
        assert_eq!(dropdown.handle_pointer_down(70, 20), PointerTarget::Ignored);
    }

    #[test]
    fn test_blur_closes_after_grace_period() {
        let context = context();
        let mut dropdown = dropdown(&context);
        let start = Instant::now();

        dropdown.on_input("re");
        dropdown.on_blur(start);
        assert!(dropdown.is_blur_pending());
        dropdown.advance(start + Duration::from_millis(100));
        assert!(dropdown.is_visible());
        dropdown.advance(start + Duration::from_millis(150));
        assert!(!dropdown.is_visible());
        assert!(!dropdown.is_blur_pending());
    }

    #[test]
    fn test_refocus_cancels_blur() {
        let context = context();
        let mut dropdown = dropdown(&context);
        let start = Instant::now();

        dropdown.on_input("re");
        dropdown.on_blur(start);
        dropdown.on_focus();
        dropdown.advance(start + Duration::from_secs(1));
        assert!(dropdown.is_visible());
    }

    #[test]
    fn test_select_returns_name_and_closes() {
        let context = context();
        let mut dropdown = dropdown(&context);

        dropdown.on_input("re");
        dropdown.move_down();
        assert_eq!(dropdown.select_highlighted(), Some("Redux".to_string()));
        assert!(!dropdown.is_visible());
        assert_eq!(dropdown.query(), "Redux");
        assert_eq!(dropdown.display_names(), vec!["Redux"]);
        assert_eq!(context.listeners.total(), 0);
    }

    #[test]
    fn test_blank_candidates_are_not_selectable() {
        let context = context();
        let mut dropdown = AnchoredDropdown::new(DropdownConfig::default(), &context)
            .with_candidates(vec![DropdownCandidate::new("   "), DropdownCandidate::new("Go")]);

        dropdown.on_focus();
        assert_eq!(dropdown.select(0), None);
        assert!(dropdown.is_visible());
        assert_eq!(dropdown.select(1), Some("Go".to_string()));
        assert_eq!(dropdown.select(7), None);
    }

    #[test]
    fn test_reopen_reproduces_filtered_set() {
        let context = context();
        let mut dropdown = dropdown(&context);

        dropdown.on_input("re");
        let before: Vec<String> = dropdown.display_names().iter().map(|s| s.to_string()).collect();
        dropdown.select(0);
        dropdown.on_input("re");
        assert_eq!(dropdown.display_names(), before);
    }

    #[test]
    fn test_highlight_wraps() {
        let context = context();
        let mut dropdown = dropdown(&context);
        dropdown.on_input("re");

        dropdown.move_up();
        assert_eq!(dropdown.highlighted(), 1);
        dropdown.move_down();
        assert_eq!(dropdown.highlighted(), 0);
    }

    #[test]
    fn test_portal_render_escapes_clip() {
        let context = context();
        let mut dropdown = dropdown(&context);
        dropdown.on_input("re");

        let viewport = Rect::new(0, 0, 80, 24);
        context.overlays.begin_frame(viewport);
        let mut buf = Buffer::empty(viewport);
        // The parent only owns the anchor rows; the panel lands below them anyway.
        dropdown.render(&mut buf, Rect::new(10, 3, 30, 4), &Theme::default());
        context.overlays.composite(&mut buf);

        let row: String = (11..16).map(|x| buf.get(x, 8).symbol().to_string()).collect();
        assert_eq!(row, "React");
    }

    #[test]
    fn test_inline_render_is_clipped() {
        let context = context();
        let mut dropdown = AnchoredDropdown::new(DropdownConfig::compact(&context.settings), &context)
            .with_candidates(frameworks());
        dropdown.set_anchor(Rect::new(10, 4, 30, 3), Rect::new(10, 3, 30, 4));
        dropdown.on_input("re");

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        dropdown.render(&mut buf, Rect::new(0, 0, 80, 9), &Theme::default());

        assert_eq!(buf.get(10, 7).symbol(), "╭");
        assert!(dropdown.owns_point(11, 8));
        // Row 9 is outside the clip area and stays untouched.
        assert_eq!(buf.get(11, 9).symbol(), " ");
        assert!(!dropdown.owns_point(11, 9));
    }
}
