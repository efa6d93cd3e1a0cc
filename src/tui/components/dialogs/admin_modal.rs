//! Tabbed, searchable admin dialog rendered above the page
//!
//! The dialog owns its open/closing lifecycle: opening attaches an overlay
//! container and the keyboard, pointer-down and resize listeners; a close
//! request detaches the listeners and starts the closing transition, after
//! which [`ModalEvent::Closed`] is sent exactly once.

use super::layout::ModalLayout;
use super::types::{
    normalize_breadcrumbs, progress_fill_percent, ActionButton, ActionPresentation, ActionVariant,
    BreadcrumbItem, DialogPhase, DialogState, ModalConfig, ModalError, ModalEvent,
};
use crate::tui::{
    components::{overlay::OverlayHost, spinner::Spinner, Component},
    context::UiContext,
    keys::ModalShortcut,
    listeners::{ListenerHandle, ListenerKind},
    themes::Theme,
    timer::DelayedAction,
    utils::{layout::contains, text},
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Widget},
};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Listeners held while the dialog is open
const OPEN_LISTENERS: [ListenerKind; 3] = [
    ListenerKind::Keyboard,
    ListenerKind::PointerDown,
    ListenerKind::Resize,
];

/// Clickable regions recorded while drawing
#[derive(Debug, Clone, PartialEq, Eq)]
enum HitTarget {
    Tab(usize),
    Action(String),
    Breadcrumb(String),
    Search,
    SearchClear,
}

/// Which slot supplies the visible content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSlot {
    Tab(String),
    Children,
    Empty,
}

pub struct AdminModal {
    config: ModalConfig,
    state: DialogState,
    host: OverlayHost,
    listeners: ListenerHandle,
    close_timer: DelayedAction,
    spinner: Spinner,
    event_sender: Option<mpsc::UnboundedSender<ModalEvent>>,
    layout: Option<ModalLayout>,
    hits: Vec<(Rect, HitTarget)>,
    tooltips: Vec<(Rect, String)>,
    hover: Option<(u16, u16)>,
    size: Rect,
}

impl AdminModal {
    /// Create a closed dialog
    pub fn new(mut config: ModalConfig, context: &UiContext) -> Result<Self, ModalError> {
        config.validate()?;
        normalize_breadcrumbs(&mut config.breadcrumbs);

        let state = DialogState {
            phase: DialogPhase::Closed,
            active_tab_id: config.active_tab.clone(),
            search_text: config.search_value.clone(),
            search_focused: false,
            progress: config.progress,
            error: config.error.clone(),
            success: config.success.clone(),
        };

        Ok(Self {
            close_timer: DelayedAction::new("modal-close", config.close_delay),
            config,
            state,
            host: OverlayHost::new(context.overlays.clone(), "modal"),
            listeners: context.listeners.handle(),
            spinner: Spinner::default(),
            event_sender: None,
            layout: None,
            hits: Vec::new(),
            tooltips: Vec::new(),
            hover: None,
            size: Rect::default(),
        })
    }

    /// Set event sender for dialog callbacks
    pub fn with_event_sender(mut self, sender: mpsc::UnboundedSender<ModalEvent>) -> Self {
        self.event_sender = Some(sender);
        self
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn phase(&self) -> DialogPhase {
        self.state.phase
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_closing(&self) -> bool {
        self.state.is_closing()
    }

    /// Layout of the last drawn frame
    pub fn layout(&self) -> Option<&ModalLayout> {
        self.layout.as_ref()
    }

    /// Drive the open flag.
    ///
    /// Opening while closing cancels the transition. Closing from here
    /// unmounts at once and sends no [`ModalEvent::Closed`].
    pub fn set_open(&mut self, open: bool) {
        match (open, self.state.phase) {
            (true, DialogPhase::Closed) => self.mount(),
            (true, DialogPhase::Closing) => {
                self.close_timer.cancel();
                self.state.phase = DialogPhase::Open;
                self.listeners.attach_all(&OPEN_LISTENERS);
                debug!("Dialog '{}' reopened during closing transition", self.config.title);
            }
            (false, DialogPhase::Open | DialogPhase::Closing) => self.unmount(),
            _ => {}
        }
    }

    /// Ask the dialog to close. Returns whether a closing transition is pending.
    pub fn request_close(&mut self) -> bool {
        self.request_close_at(Instant::now())
    }

    pub fn request_close_at(&mut self, now: Instant) -> bool {
        if self.config.prevent_close {
            debug!("Close of dialog '{}' prevented", self.config.title);
            return false;
        }

        match self.state.phase {
            DialogPhase::Open => {
                self.state.phase = DialogPhase::Closing;
                self.listeners.detach_all();
                self.close_timer.schedule(now);
                debug!("Dialog '{}' closing", self.config.title);
                true
            }
            DialogPhase::Closing => {
                self.close_timer.schedule(now);
                trace!("closing transition rescheduled");
                true
            }
            DialogPhase::Closed => false,
        }
    }

    fn mount(&mut self) {
        // A missing root is logged by the host; the dialog just won't draw.
        let _ = self.host.activate();
        self.listeners.attach_all(&OPEN_LISTENERS);
        self.state.phase = DialogPhase::Open;

        let focus_content = !self.state.search_focused;
        if let Some(content) = self.active_content_mut() {
            content.set_focus(focus_content);
        }
        debug!("Dialog '{}' opened", self.config.title);
    }

    fn unmount(&mut self) {
        self.close_timer.cancel();
        self.teardown();
        debug!("Dialog '{}' unmounted", self.config.title);
    }

    fn finish_close(&mut self) {
        if self.state.phase != DialogPhase::Closing {
            return;
        }
        self.teardown();
        debug!("Dialog '{}' closed", self.config.title);
        self.emit(ModalEvent::Closed);
    }

    fn teardown(&mut self) {
        self.listeners.detach_all();
        self.host.deactivate();
        self.state.phase = DialogPhase::Closed;
        self.state.search_focused = false;
        self.layout = None;
        self.hits.clear();
        self.tooltips.clear();
        self.hover = None;
        if let Some(content) = self.active_content_mut() {
            content.set_focus(false);
            content.dismiss();
        }
    }

    fn emit(&self, event: ModalEvent) {
        if let Some(sender) = &self.event_sender {
            let _ = sender.send(event);
        }
    }

    /// Resolve which content is on display
    pub fn content_slot(&self) -> ContentSlot {
        let enabled = |id: &str| self.config.tabs.iter().any(|tab| tab.id == id && !tab.disabled);

        let tab = match &self.state.active_tab_id {
            Some(id) if enabled(id) => Some(id.clone()),
            Some(_) => None,
            None => self
                .config
                .tabs
                .iter()
                .find(|tab| !tab.disabled)
                .map(|tab| tab.id.clone()),
        };

        match tab {
            Some(id) => ContentSlot::Tab(id),
            None if self.config.children.is_some() => ContentSlot::Children,
            None => ContentSlot::Empty,
        }
    }

    fn active_content(&self) -> Option<&dyn Component> {
        match self.content_slot() {
            ContentSlot::Tab(id) => self
                .config
                .tabs
                .iter()
                .find(|tab| tab.id == id)
                .map(|tab| tab.content.as_ref()),
            ContentSlot::Children => self.config.children.as_deref(),
            ContentSlot::Empty => None,
        }
    }

    fn active_content_mut(&mut self) -> Option<&mut Box<dyn Component>> {
        match self.content_slot() {
            ContentSlot::Tab(id) => self
                .config
                .tabs
                .iter_mut()
                .find(|tab| tab.id == id)
                .map(|tab| &mut tab.content),
            ContentSlot::Children => self.config.children.as_mut(),
            ContentSlot::Empty => None,
        }
    }

    /// Activate a tab by id. Unknown and disabled tabs are inert.
    pub fn activate_tab(&mut self, id: &str) -> bool {
        match self.config.tabs.iter().find(|tab| tab.id == id) {
            Some(tab) if !tab.disabled => {}
            Some(_) => {
                debug!("Tab '{}' is disabled", id);
                return false;
            }
            None => {
                debug!("Tab '{}' not found", id);
                return false;
            }
        }

        if self.state.active_tab_id.as_deref() == Some(id) {
            return true;
        }

        let previous = self.content_slot();
        if let Some(content) = self.active_content_mut() {
            content.set_focus(false);
            content.dismiss();
        }

        self.state.active_tab_id = Some(id.to_string());
        let focus_content = self.state.is_mounted() && !self.state.search_focused;
        if let Some(content) = self.active_content_mut() {
            content.set_focus(focus_content);
        }

        debug!("Tab changed from {:?} to '{}'", previous, id);
        self.emit(ModalEvent::TabChanged(id.to_string()));
        true
    }

    /// Activate the tab at a zero-based position
    pub fn activate_nth_tab(&mut self, index: usize) -> bool {
        match self.config.tabs.get(index) {
            Some(tab) => {
                let id = tab.id.clone();
                self.activate_tab(&id)
            }
            None => false,
        }
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.state.active_tab_id.as_deref()
    }

    pub fn search_value(&self) -> &str {
        &self.state.search_text
    }

    /// Consumer-driven search value; sends no event
    pub fn set_search_value(&mut self, value: impl Into<String>) {
        self.state.search_text = value.into();
    }

    /// Reset the search text, reporting the change
    pub fn clear_search(&mut self) {
        self.edit_search(String::new());
    }

    pub fn is_search_focused(&self) -> bool {
        self.state.search_focused
    }

    pub fn focus_search(&mut self, focused: bool) {
        let focused = focused && self.config.show_search;
        if self.state.search_focused == focused {
            return;
        }
        self.state.search_focused = focused;
        if let Some(content) = self.active_content_mut() {
            content.set_focus(!focused);
        }
    }

    fn edit_search(&mut self, value: String) {
        if self.state.search_text == value {
            return;
        }
        self.state.search_text = value.clone();
        self.emit(ModalEvent::SearchChanged(value));
    }

    fn handle_search_key(&mut self, event: KeyEvent) {
        match event.code {
            KeyCode::Char(ch)
                if !event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut value = self.state.search_text.clone();
                value.push(ch);
                self.edit_search(value);
            }
            KeyCode::Backspace => {
                let mut value = self.state.search_text.clone();
                if value.pop().is_some() {
                    self.edit_search(value);
                }
            }
            KeyCode::Enter | KeyCode::Down => self.focus_search(false),
            _ => {}
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
    }

    pub fn set_success(&mut self, success: Option<String>) {
        self.state.success = success;
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.config.show_progress = true;
        self.state.progress = progress;
    }

    /// Fill of the progress bar, clamped to 0..=100
    pub fn progress_percent(&self) -> u16 {
        progress_fill_percent(self.state.progress)
    }

    pub fn set_actions(&mut self, actions: ActionPresentation) {
        self.config.actions = actions;
    }

    pub fn set_action_loading(&mut self, id: &str, loading: bool) -> bool {
        self.update_action(id, |action| action.loading = loading)
    }

    pub fn set_action_disabled(&mut self, id: &str, disabled: bool) -> bool {
        self.update_action(id, |action| action.disabled = disabled)
    }

    fn update_action(&mut self, id: &str, update: impl FnOnce(&mut ActionButton)) -> bool {
        match self
            .config
            .actions
            .actions_mut()
            .iter_mut()
            .find(|action| action.id == id)
        {
            Some(action) => {
                update(action);
                true
            }
            None => false,
        }
    }

    /// Activate an action as if clicked. Disabled and loading actions are inert.
    pub fn trigger_action(&mut self, id: &str) -> bool {
        match self.config.actions.find(id) {
            Some(action) if action.is_interactive() => {
                debug!("Action '{}' triggered", id);
                self.emit(ModalEvent::ActionTriggered(id.to_string()));
                true
            }
            Some(_) => {
                debug!("Action '{}' ignored while disabled or loading", id);
                false
            }
            None => false,
        }
    }

    pub fn set_breadcrumbs(&mut self, mut items: Vec<BreadcrumbItem>) {
        normalize_breadcrumbs(&mut items);
        self.config.show_breadcrumb = !items.is_empty();
        self.config.breadcrumbs = items;
    }

    pub fn select_breadcrumb(&mut self, id: &str) -> bool {
        let clickable = self
            .config
            .breadcrumbs
            .iter()
            .any(|item| item.id == id && item.clickable);
        if clickable {
            self.emit(ModalEvent::BreadcrumbSelected(id.to_string()));
        }
        clickable
    }

    fn hit_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.hits
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, target)| target.clone())
    }

    fn dispatch_hit(&mut self, target: HitTarget) {
        match target {
            HitTarget::Tab(index) => {
                self.activate_nth_tab(index);
            }
            HitTarget::Action(id) => {
                self.trigger_action(&id);
            }
            HitTarget::Breadcrumb(id) => {
                self.select_breadcrumb(&id);
            }
            HitTarget::Search => self.focus_search(true),
            HitTarget::SearchClear => {
                self.clear_search();
                self.focus_search(true);
            }
        }
    }

    /// Chrome and backdrop clicks never reach the content, but its open
    /// panels still have to see them as outside clicks
    fn notify_pointer_elsewhere(&mut self, column: u16, row: u16) {
        if let Some(content) = self.active_content_mut() {
            content.pointer_down_elsewhere(column, row);
        }
    }

    async fn forward_mouse(&mut self, event: MouseEvent) -> Result<()> {
        if let Some(content) = self.active_content_mut() {
            content.handle_mouse_event(event).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Component for AdminModal {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if !self.listeners.is_attached(ListenerKind::Keyboard) || event.kind == KeyEventKind::Release {
            return Ok(());
        }

        let handled = match ModalShortcut::classify(&event) {
            ModalShortcut::Close => self.request_close(),
            ModalShortcut::Refresh if self.config.refresh_enabled => {
                self.emit(ModalEvent::Refresh);
                true
            }
            ModalShortcut::Tab(index) => self.activate_nth_tab(index),
            ModalShortcut::ClearSearch if self.config.show_search => {
                self.clear_search();
                true
            }
            _ => false,
        };

        if self.config.forward_shortcuts {
            self.emit(ModalEvent::Shortcut(event));
        }

        if handled || !self.state.is_open() {
            return Ok(());
        }

        if event.code == KeyCode::Tab && self.config.show_search {
            let focused = !self.state.search_focused;
            self.focus_search(focused);
            return Ok(());
        }

        if self.state.search_focused {
            self.handle_search_key(event);
            return Ok(());
        }

        if let Some(content) = self.active_content_mut() {
            content.handle_key_event(event).await?;
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if !self.listeners.is_attached(ListenerKind::PointerDown) {
            return Ok(());
        }
        let Some(layout) = self.layout.clone() else {
            return Ok(());
        };

        if event.kind == MouseEventKind::Moved {
            self.hover = Some((event.column, event.row));
        }
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return self.forward_mouse(event).await;
        }

        let (column, row) = (event.column, event.row);
        let layer = self.host.layer_id();
        let covered = self
            .host
            .root()
            .hit_test(column, row)
            .is_some_and(|top| Some(top) != layer);
        let content_owns = self
            .active_content()
            .is_some_and(|content| content.owns_point(column, row));

        // Floating panels opened by the content belong to the content, even
        // where they hang over the backdrop.
        if content_owns && (covered || !contains(layout.content, column, row)) {
            return self.forward_mouse(event).await;
        }

        if let Some(target) = self.hit_at(column, row) {
            self.notify_pointer_elsewhere(column, row);
            self.dispatch_hit(target);
            return Ok(());
        }

        if contains(layout.panel, column, row) {
            if contains(layout.content, column, row) {
                self.focus_search(false);
            }
            return self.forward_mouse(event).await;
        }

        debug!("Backdrop click at ({}, {})", column, row);
        self.notify_pointer_elsewhere(column, row);
        self.request_close();
        Ok(())
    }

    async fn handle_resize(&mut self, viewport: Rect) -> Result<()> {
        if !self.listeners.is_attached(ListenerKind::Resize) {
            return Ok(());
        }
        if let Some(content) = self.active_content_mut() {
            content.handle_resize(viewport).await?;
        }
        Ok(())
    }

    fn advance(&mut self, now: Instant) {
        self.spinner.advance(now);
        if self.state.is_mounted() {
            if let Some(content) = self.active_content_mut() {
                content.advance(now);
            }
        }
        if self.close_timer.fire_if_due(now) {
            self.finish_close();
        }
    }

    fn dismiss(&mut self) {
        self.set_open(false);
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        self.size = area;
        self.hits.clear();
        self.tooltips.clear();
        if !self.state.is_mounted() {
            self.layout = None;
            return;
        }

        let root_viewport = self.host.root().viewport();
        let viewport = if root_viewport.width == 0 || root_viewport.height == 0 {
            buf.area
        } else {
            root_viewport
        };
        let layout = ModalLayout::calculate(&self.config, &self.state, viewport);
        let spinner_frame = self.spinner.frame();
        let slot = self.content_slot();
        let closing = self.state.is_closing();

        let Self {
            config,
            state,
            host,
            hits,
            tooltips,
            hover,
            ..
        } = self;
        let hover = *hover;

        let drew = host.draw(|surface| {
            if !closing {
                surface.tint(layout.viewport, theme.backdrop_style());
            }

            {
                let target = surface.buffer_mut();
                draw_chrome(target, &layout, config, state, theme, spinner_frame, hits, tooltips);

                let content = match &slot {
                    ContentSlot::Tab(id) => config
                        .tabs
                        .iter_mut()
                        .find(|tab| &tab.id == id)
                        .map(|tab| &mut tab.content),
                    ContentSlot::Children => config.children.as_mut(),
                    ContentSlot::Empty => None,
                };
                if let Some(content) = content {
                    content.render(target, layout.content, theme);
                }

                draw_floating(target, &layout, &config.actions, theme, spinner_frame, hits, tooltips);

                let hovered = hover.and_then(|(column, row)| {
                    tooltips
                        .iter()
                        .find(|(cells, _)| contains(*cells, column, row))
                });
                if let Some((cells, tip)) = hovered {
                    draw_tooltip(target, *cells, tip, layout.viewport, theme);
                }
            }

            if closing {
                surface.tint(layout.panel, Style::default().add_modifier(Modifier::DIM));
            }
        });

        self.layout = drew.then_some(layout);
    }

    fn owns_point(&self, column: u16, row: u16) -> bool {
        self.state.is_mounted()
            && self
                .layout
                .as_ref()
                .is_some_and(|layout| contains(layout.viewport, column, row))
    }

    fn size(&self) -> Rect {
        self.size
    }

    fn set_size(&mut self, size: Rect) {
        self.size = size;
    }

    fn has_focus(&self) -> bool {
        self.state.is_open()
    }

    fn is_visible(&self) -> bool {
        self.state.is_mounted()
    }
}

/// Writes styled segments left to right along one row
struct RowWriter<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    x: u16,
}

impl<'a> RowWriter<'a> {
    fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area, x: area.x }
    }

    /// Returns the cells covered, if anything fit
    fn push(&mut self, text: &str, style: Style) -> Option<Rect> {
        let remaining = self.area.right().saturating_sub(self.x);
        if remaining == 0 || text.is_empty() {
            return None;
        }
        let start = self.x;
        let (end, _) = self
            .buf
            .set_stringn(self.x, self.area.y, text, remaining as usize, style);
        self.x = end;
        (end > start).then(|| Rect::new(start, self.area.y, end - start, 1))
    }
}

fn button_text(action: &ActionButton, spinner_frame: &str) -> String {
    let glyph = if action.loading {
        Some(spinner_frame)
    } else {
        action.icon.as_deref()
    };
    match glyph {
        Some(glyph) => format!("[ {} {} ]", glyph, action.label),
        None => format!("[ {} ]", action.label),
    }
}

fn button_style(action: &ActionButton, theme: &Theme) -> Style {
    if !action.is_interactive() {
        return Style::default()
            .fg(theme.fg_subtle)
            .add_modifier(Modifier::DIM);
    }
    let color = match action.variant {
        ActionVariant::Primary => theme.primary,
        ActionVariant::Secondary => theme.fg_muted,
        ActionVariant::Danger => theme.error,
        ActionVariant::Success => theme.success,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

#[allow(clippy::too_many_arguments)]
fn draw_chrome(
    buf: &mut Buffer,
    layout: &ModalLayout,
    config: &ModalConfig,
    state: &DialogState,
    theme: &Theme,
    spinner_frame: &str,
    hits: &mut Vec<(Rect, HitTarget)>,
    tooltips: &mut Vec<(Rect, String)>,
) {
    Clear.render(layout.panel, buf);

    let title = match &config.icon {
        Some(icon) => format!(" {} {} ", icon, config.title),
        None => format!(" {} ", config.title),
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(state.is_open()))
        .title(Span::styled(title, theme.title_style()))
        .style(theme.base_style())
        .render(layout.panel, buf);

    if let (Some(area), Some(subtitle)) = (layout.subtitle, &config.subtitle) {
        Paragraph::new(subtitle.as_str())
            .style(theme.muted_style())
            .render(area, buf);
    }

    if let Some(area) = layout.breadcrumb {
        let mut row = RowWriter::new(buf, area);
        for (index, item) in config.breadcrumbs.iter().enumerate() {
            if index > 0 {
                row.push(" › ", theme.muted_style());
            }
            let label = match &item.icon {
                Some(icon) => format!("{} {}", icon, item.label),
                None => item.label.clone(),
            };
            let style = if item.active {
                Style::default()
                    .fg(theme.fg_selected)
                    .add_modifier(Modifier::BOLD)
            } else if item.clickable {
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                theme.muted_style()
            };
            if let Some(cells) = row.push(&label, style) {
                if item.clickable {
                    hits.push((cells, HitTarget::Breadcrumb(item.id.clone())));
                }
            }
        }
    }

    if let (Some(area), ActionPresentation::Toolbar(actions)) = (layout.toolbar, &config.actions) {
        let mut row = RowWriter::new(buf, area);
        for (index, action) in actions.iter().enumerate() {
            if index > 0 {
                row.push(" ", theme.base_style());
            }
            let cells = row.push(&button_text(action, spinner_frame), button_style(action, theme));
            record_action(cells, action, hits, tooltips);
        }
    }

    if let Some(area) = layout.search {
        draw_search(buf, area, config, state, theme, hits);
    }

    if let Some(area) = layout.tabs {
        let active = match &state.active_tab_id {
            Some(id) => Some(id.clone()),
            None => config
                .tabs
                .iter()
                .find(|tab| !tab.disabled)
                .map(|tab| tab.id.clone()),
        };

        let mut row = RowWriter::new(buf, area);
        for (index, tab) in config.tabs.iter().enumerate() {
            if index > 0 {
                row.push("│", theme.muted_style());
            }
            let mut label = String::from(" ");
            if let Some(icon) = &tab.icon {
                label.push_str(icon);
                label.push(' ');
            }
            label.push_str(&tab.label);
            if let Some(badge) = &tab.badge {
                label.push_str(&format!(" ({})", badge));
            }
            label.push(' ');

            let style = if tab.disabled {
                Style::default()
                    .fg(theme.fg_subtle)
                    .add_modifier(Modifier::DIM)
            } else if active.as_deref() == Some(tab.id.as_str()) {
                theme.selected_style()
            } else {
                theme.text_style()
            };
            if let Some(cells) = row.push(&label, style) {
                if !tab.disabled {
                    hits.push((cells, HitTarget::Tab(index)));
                }
                if let Some(tip) = &tab.tooltip {
                    tooltips.push((cells, tip.clone()));
                }
            }
        }
    }

    if let (Some(area), Some(error)) = (layout.error, &state.error) {
        Paragraph::new(format!("✖ {}", error))
            .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
            .render(area, buf);
    }

    if let (Some(area), Some(success)) = (layout.success, &state.success) {
        Paragraph::new(format!("✔ {}", success))
            .style(Style::default().fg(theme.success))
            .render(area, buf);
    }

    if let Some(area) = layout.progress {
        let percent = progress_fill_percent(state.progress);
        Gauge::default()
            .percent(percent)
            .label(format!("{}%", percent))
            .gauge_style(Style::default().fg(theme.primary).bg(theme.bg_subtle))
            .render(area, buf);
    }
}

fn draw_search(
    buf: &mut Buffer,
    area: Rect,
    config: &ModalConfig,
    state: &DialogState,
    theme: &Theme,
    hits: &mut Vec<(Rect, HitTarget)>,
) {
    buf.set_style(area, Style::default().bg(theme.bg_subtle));

    let has_text = !state.search_text.is_empty();
    let clear_width = if has_text { 2 } else { 0 };
    let field = Rect {
        width: area.width.saturating_sub(clear_width),
        ..area
    };

    let mut row = RowWriter::new(buf, field);
    let prompt_style = if state.search_focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        theme.muted_style()
    };
    row.push("/ ", prompt_style);

    if has_text {
        let visible = text::truncate(&state.search_text, field.width.saturating_sub(3));
        row.push(&visible, theme.text_style());
    } else if !state.search_focused {
        row.push(
            &config.search_placeholder,
            Style::default()
                .fg(theme.fg_subtle)
                .add_modifier(Modifier::ITALIC),
        );
    }
    if state.search_focused {
        row.push(" ", Style::default().bg(theme.accent));
    }

    if has_text && area.width >= clear_width {
        let clear = Rect::new(area.right() - clear_width, area.y, clear_width, 1);
        buf.set_string(clear.x, clear.y, "✕", Style::default().fg(theme.fg_muted));
        hits.push((clear, HitTarget::SearchClear));
    }
    hits.push((area, HitTarget::Search));
}

#[allow(clippy::too_many_arguments)]
fn draw_floating(
    buf: &mut Buffer,
    layout: &ModalLayout,
    actions: &ActionPresentation,
    theme: &Theme,
    spinner_frame: &str,
    hits: &mut Vec<(Rect, HitTarget)>,
    tooltips: &mut Vec<(Rect, String)>,
) {
    let (Some(area), ActionPresentation::Floating { actions, .. }) = (layout.floating, actions) else {
        return;
    };

    Clear.render(area, buf);
    for (index, action) in actions.iter().enumerate() {
        let Some(y) = area.y.checked_add(index as u16).filter(|y| *y < area.bottom()) else {
            break;
        };
        let mut row = RowWriter::new(buf, Rect { y, height: 1, ..area });
        let cells = row.push(&button_text(action, spinner_frame), button_style(action, theme));
        record_action(cells, action, hits, tooltips);
    }
}

fn record_action(
    cells: Option<Rect>,
    action: &ActionButton,
    hits: &mut Vec<(Rect, HitTarget)>,
    tooltips: &mut Vec<(Rect, String)>,
) {
    let Some(cells) = cells else {
        return;
    };
    if action.is_interactive() {
        hits.push((cells, HitTarget::Action(action.id.clone())));
    }
    if let Some(tip) = &action.tooltip {
        tooltips.push((cells, tip.clone()));
    }
}

/// One-row hint under `anchor`, or above it on the last row
fn draw_tooltip(buf: &mut Buffer, anchor: Rect, tip: &str, bounds: Rect, theme: &Theme) {
    let width = text::width(tip).saturating_add(2).min(bounds.width);
    let y = if anchor.bottom() < bounds.bottom() {
        anchor.bottom()
    } else if anchor.y > bounds.y {
        anchor.y - 1
    } else {
        return;
    };
    if width < 3 {
        return;
    }
    let x = anchor.x.min(bounds.right().saturating_sub(width)).max(bounds.x);
    let area = Rect::new(x, y, width, 1);
    let style = Style::default().fg(theme.fg_selected).bg(theme.bg_subtle);
    Clear.render(area, buf);
    buf.set_style(area, style);
    buf.set_stringn(x + 1, y, tip, (width - 2) as usize, style);
}
