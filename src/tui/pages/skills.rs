//! Skills section editor
//!
//! Keeps the skills in memory and edits them through an admin dialog with a
//! list, a form with two pickers, and a read-only settings tab.

use super::{Page, PageId};
use crate::tui::{
    components::{
        dialogs::{
            ActionButton, ActionVariant, AdminModal, Badge, BreadcrumbItem, Corner, ModalConfig,
            ModalEvent, ModalSize, TabConfig,
        },
        dropdown::{DropdownCandidate, DropdownConfig, FieldEvent, PickerField},
        Component, ComponentState, TextPanel,
    },
    context::UiContext,
    keys::KeyMap,
    themes::Theme,
    timer::DelayedAction,
    utils::layout::contains,
};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use parking_lot::Mutex;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How long the simulated save takes
const SAVE_DURATION: Duration = Duration::from_millis(600);

const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub category: String,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Skills plus the list view's filter and selection
#[derive(Debug, Default)]
pub struct SkillBoard {
    pub skills: Vec<Skill>,
    pub filter: String,
    pub selected: usize,
}

impl SkillBoard {
    /// Skills whose name or category contains the filter, ignoring case
    pub fn visible(&self) -> Vec<&Skill> {
        let needle = self.filter.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| {
                needle.is_empty()
                    || skill.name.to_lowercase().contains(&needle)
                    || skill.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn selected_skill(&self) -> Option<&Skill> {
        self.visible().get(self.selected).copied()
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(len as isize) as usize;
    }
}

type SharedBoard = Arc<Mutex<SkillBoard>>;

fn seed_skills() -> Vec<Skill> {
    vec![
        Skill::new("Rust", "backend"),
        Skill::new("React", "frontend"),
        Skill::new("PostgreSQL", "database"),
    ]
}

/// Suggestions offered by the skill name picker
pub fn skill_catalog() -> Vec<DropdownCandidate> {
    let groups: [(&str, &str, &[&str]); 4] = [
        ("frontend", "◆", &["React", "Redux", "Vue", "Svelte", "Angular", "TypeScript"]),
        ("backend", "●", &["Rust", "Go", "Node.js", "Django", "Spring", "Elixir"]),
        ("database", "▣", &["PostgreSQL", "SQLite", "Redis", "MongoDB", "MySQL"]),
        ("devops", "▲", &["Docker", "Kubernetes", "Terraform", "Ansible"]),
    ];

    groups
        .iter()
        .flat_map(|(category, icon, names)| {
            names.iter().map(move |name| {
                DropdownCandidate::new(*name)
                    .with_category(*category)
                    .with_icon(*icon)
            })
        })
        .collect()
}

fn category_candidates() -> Vec<DropdownCandidate> {
    ["frontend", "backend", "database", "devops", DEFAULT_CATEGORY]
        .into_iter()
        .map(DropdownCandidate::new)
        .collect()
}

/// List tab: the filtered skills
struct SkillListView {
    state: ComponentState,
    board: SharedBoard,
}

impl SkillListView {
    fn new(board: SharedBoard) -> Self {
        Self {
            state: ComponentState::new(),
            board,
        }
    }
}

#[async_trait]
impl Component for SkillListView {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match event.code {
            KeyCode::Up => self.board.lock().move_selection(-1),
            KeyCode::Down => self.board.lock().move_selection(1),
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        self.state.size = area;
        let board = self.board.lock();
        let visible = board.visible();

        if visible.is_empty() {
            let message = if board.filter.is_empty() {
                "No skills yet. Add one from the Form tab.".to_string()
            } else {
                format!("No skills match '{}'", board.filter)
            };
            Paragraph::new(message)
                .style(theme.muted_style())
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .map(|skill| {
                ListItem::new(Line::from(vec![
                    Span::styled(skill.name.as_str(), theme.text_style()),
                    Span::styled(format!("  {}", skill.category), theme.muted_style()),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(board.selected.min(visible.len() - 1)));
        StatefulWidget::render(
            List::new(items)
                .highlight_style(theme.selected_style())
                .highlight_symbol("▸ "),
            area,
            buf,
            &mut list_state,
        );
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

/// Form tab: name and category pickers
struct SkillForm {
    state: ComponentState,
    fields: Vec<PickerField>,
    focused: usize,
}

impl SkillForm {
    /// Rows taken by one field: label plus a bordered input
    const FIELD_HEIGHT: u16 = 4;

    fn new(context: &UiContext, sender: mpsc::UnboundedSender<FieldEvent>) -> Self {
        let name = PickerField::new("name", "Skill name", DropdownConfig::portal(&context.settings), context)
            .with_candidates(skill_catalog())
            .with_placeholder("e.g. Rust")
            .with_event_sender(sender.clone());
        let category = PickerField::new(
            "category",
            "Category",
            DropdownConfig::compact(&context.settings),
            context,
        )
        .with_candidates(category_candidates())
        .with_placeholder("e.g. backend")
        .with_event_sender(sender);

        Self {
            state: ComponentState::new(),
            fields: vec![name, category],
            focused: 0,
        }
    }

    fn focus_field(&mut self, index: usize) {
        self.focused = index;
        let form_focused = self.state.has_focus;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(form_focused && i == index);
        }
    }
}

#[async_trait]
impl Component for SkillForm {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if event.code == KeyCode::BackTab {
            let next = (self.focused + 1) % self.fields.len();
            self.focus_field(next);
            return Ok(());
        }
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.handle_key_event(event).await?;
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        // An open panel may hang over a sibling; it gets the event alone.
        let owner = self
            .fields
            .iter()
            .position(|field| field.dropdown().owns_point(event.column, event.row));
        if let Some(index) = owner {
            return self.fields[index].handle_mouse_event(event).await;
        }

        for field in &mut self.fields {
            field.handle_mouse_event(event).await?;
        }
        if let Some(index) = self.fields.iter().position(|field| field.has_focus()) {
            self.focused = index;
            self.state.has_focus = true;
        }
        Ok(())
    }

    async fn handle_resize(&mut self, viewport: Rect) -> Result<()> {
        for field in &mut self.fields {
            field.handle_resize(viewport).await?;
        }
        Ok(())
    }

    fn advance(&mut self, now: Instant) {
        for field in &mut self.fields {
            field.advance(now);
        }
    }

    fn dismiss(&mut self) {
        for field in &mut self.fields {
            field.dismiss();
        }
    }

    fn pointer_down_elsewhere(&mut self, column: u16, row: u16) {
        for field in &mut self.fields {
            field.pointer_down_elsewhere(column, row);
        }
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        self.state.size = area;

        let mut y = area.y;
        for field in &mut self.fields {
            let height = Self::FIELD_HEIGHT.min(area.bottom().saturating_sub(y));
            field.render(buf, Rect { y, height, ..area }, theme);
            y = y.saturating_add(Self::FIELD_HEIGHT + 1);
        }

        if y < area.bottom() {
            Paragraph::new("Shift+Tab next field · ↑/↓ choose · Enter pick")
                .style(theme.muted_style().add_modifier(Modifier::ITALIC))
                .render(Rect { y, height: 1, ..area }, buf);
        }
    }

    fn owns_point(&self, column: u16, row: u16) -> bool {
        self.fields.iter().any(|field| field.owns_point(column, row))
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
        let focused = self.focused;
        self.focus_field(focused);
    }
}

#[derive(Debug, Clone, Default)]
struct SkillDraft {
    name: String,
    category: String,
}

/// Skills page with its editor dialog
pub struct SkillsPage {
    id: PageId,
    context: UiContext,
    key_map: KeyMap,
    board: SharedBoard,
    editor: Option<AdminModal>,
    editor_events: Option<mpsc::UnboundedReceiver<ModalEvent>>,
    field_sender: mpsc::UnboundedSender<FieldEvent>,
    field_events: mpsc::UnboundedReceiver<FieldEvent>,
    draft: SkillDraft,
    saving: DelayedAction,
    status: Option<String>,
    list_area: Rect,
}

impl SkillsPage {
    pub fn new(context: &UiContext) -> Self {
        let (field_sender, field_events) = mpsc::unbounded_channel();
        Self {
            id: "skills".to_string(),
            context: context.clone(),
            key_map: KeyMap::default(),
            board: Arc::new(Mutex::new(SkillBoard {
                skills: seed_skills(),
                ..SkillBoard::default()
            })),
            editor: None,
            editor_events: None,
            field_sender,
            field_events,
            draft: SkillDraft::default(),
            saving: DelayedAction::new("skill-save", SAVE_DURATION),
            status: None,
            list_area: Rect::default(),
        }
    }

    pub fn editor(&self) -> Option<&AdminModal> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut AdminModal> {
        self.editor.as_mut()
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.board
            .lock()
            .skills
            .iter()
            .map(|skill| skill.name.clone())
            .collect()
    }

    pub fn visible_names(&self) -> Vec<String> {
        self.board
            .lock()
            .visible()
            .iter()
            .map(|skill| skill.name.clone())
            .collect()
    }

    /// Build and open the editor dialog
    pub fn open_editor(&mut self) {
        if self.editor.is_some() {
            return;
        }

        let (count, filter) = {
            let board = self.board.lock();
            (board.skills.len(), board.filter.clone())
        };
        let settings = &self.context.settings;
        let settings_summary = format!(
            "Close transition: {} ms\nBlur grace: {} ms\nPicker cap: {} (compact {})\nPanel width: at least {} cells",
            settings.close_delay_ms,
            settings.blur_grace_ms,
            settings.dropdown_cap,
            settings.compact_cap,
            settings.min_panel_width,
        );

        let config = ModalConfig::new("Skills")
            .with_settings(settings)
            .with_icon("★")
            .with_subtitle("Manage the skills section")
            .with_size(ModalSize::Medium)
            .with_breadcrumbs(vec![
                BreadcrumbItem::new("admin", "Admin").clickable(),
                BreadcrumbItem::new("skills", "Skills").active(),
            ])
            .with_search("Filter skills")
            .with_search_value(filter)
            .with_refresh(true)
            .with_tab(
                TabConfig::new("list", "List", SkillListView::new(self.board.clone()))
                    .with_icon("☰")
                    .with_badge(Badge::Count(count as u64)),
            )
            .with_tab(
                TabConfig::new("form", "Form", SkillForm::new(&self.context, self.field_sender.clone()))
                    .with_icon("✎"),
            )
            .with_tab(TabConfig::new("settings", "Settings", TextPanel::new(settings_summary)))
            .with_tab(
                TabConfig::new("import", "Import", TextPanel::new(""))
                    .disabled(true)
                    .with_tooltip("Not available yet"),
            )
            .with_floating_actions(
                vec![
                    ActionButton::new("save", "Save").with_icon("✓"),
                    ActionButton::new("delete", "Delete")
                        .with_icon("✗")
                        .with_variant(ActionVariant::Danger),
                ],
                Corner::BottomRight,
            );

        match AdminModal::new(config, &self.context) {
            Ok(modal) => {
                let (tx, rx) = mpsc::unbounded_channel();
                let mut modal = modal.with_event_sender(tx);
                modal.set_open(true);
                self.editor = Some(modal);
                self.editor_events = Some(rx);
                self.draft = SkillDraft::default();
            }
            Err(err) => {
                warn!("Editor not opened: {}", err);
                self.status = Some(format!("Editor unavailable: {}", err));
            }
        }
    }

    fn handle_editor_event(&mut self, event: ModalEvent, now: Instant) {
        match event {
            ModalEvent::Closed => {
                self.editor = None;
                self.editor_events = None;
                self.saving.cancel();
                self.status = Some("Editor closed".to_string());
            }
            ModalEvent::TabChanged(id) => debug!("Editor tab: {}", id),
            ModalEvent::Refresh => {
                {
                    let mut board = self.board.lock();
                    board.skills = seed_skills();
                    board.selected = 0;
                }
                if let Some(editor) = &mut self.editor {
                    editor.set_error(None);
                    editor.set_success(Some("Reloaded".to_string()));
                }
            }
            ModalEvent::SearchChanged(value) => {
                let mut board = self.board.lock();
                board.filter = value;
                board.selected = 0;
            }
            ModalEvent::ActionTriggered(id) => match id.as_str() {
                "save" => self.begin_save(now),
                "delete" => self.delete_selected(),
                other => debug!("Unhandled action '{}'", other),
            },
            ModalEvent::BreadcrumbSelected(id) => {
                if id == "admin" {
                    if let Some(editor) = &mut self.editor {
                        editor.request_close_at(now);
                    }
                }
            }
            ModalEvent::Shortcut(_) => {}
        }
    }

    fn begin_save(&mut self, now: Instant) {
        let Some(editor) = &mut self.editor else {
            return;
        };

        let name = self.draft.name.trim().to_string();
        if name.is_empty() {
            editor.set_success(None);
            editor.set_error(Some("Name is required".to_string()));
            return;
        }
        let exists = self
            .board
            .lock()
            .skills
            .iter()
            .any(|skill| skill.name.eq_ignore_ascii_case(&name));
        if exists {
            editor.set_success(None);
            editor.set_error(Some(format!("'{}' already exists", name)));
            return;
        }

        editor.set_error(None);
        editor.set_success(None);
        editor.set_action_loading("save", true);
        editor.set_progress(0.0);
        self.saving.schedule(now);
        info!("Saving skill '{}'", name);
    }

    fn finish_save(&mut self) {
        let name = self.draft.name.trim().to_string();
        let category = match self.draft.category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            category => category.to_string(),
        };

        self.board.lock().skills.push(Skill::new(name.clone(), category));
        if let Some(editor) = &mut self.editor {
            editor.set_action_loading("save", false);
            editor.set_progress(100.0);
            editor.set_success(Some(format!("Saved '{}'", name)));
        }
        info!("Skill '{}' saved", name);
    }

    fn delete_selected(&mut self) {
        let removed = {
            let mut board = self.board.lock();
            let target = board.selected_skill().map(|skill| skill.name.clone());
            if let Some(name) = &target {
                board.skills.retain(|skill| &skill.name != name);
                board.selected = 0;
            }
            target
        };

        if let Some(editor) = &mut self.editor {
            match removed {
                Some(name) => {
                    editor.set_error(None);
                    editor.set_success(Some(format!("Deleted '{}'", name)));
                }
                None => editor.set_error(Some("Nothing selected".to_string())),
            }
        }
    }

    fn render_list(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style(self.editor.is_none()))
            .style(theme.base_style());
        let inner = block.inner(area);
        self.list_area = inner;

        let board = self.board.lock();
        let title = if board.filter.is_empty() {
            format!(" Skills ({}) ", board.skills.len())
        } else {
            format!(" Skills ({}, filter '{}') ", board.skills.len(), board.filter)
        };
        block
            .title(Span::styled(title, theme.title_style()))
            .render(area, buf);

        let visible = board.visible();
        let mut lines: Vec<Line> = visible
            .iter()
            .enumerate()
            .map(|(index, skill)| {
                let (marker, style) = if index == board.selected {
                    ("▸ ", theme.selected_style())
                } else {
                    ("• ", theme.text_style())
                };
                Line::from(vec![
                    Span::styled(format!("{}{}", marker, skill.name), style),
                    Span::styled(format!("  {}", skill.category), theme.muted_style()),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Press n to open the editor",
            Style::default().fg(theme.fg_subtle),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[async_trait]
impl Page for SkillsPage {
    fn id(&self) -> &PageId {
        &self.id
    }

    fn title(&self) -> &str {
        "Skills"
    }

    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if let Some(editor) = &mut self.editor {
            return editor.handle_key_event(event).await;
        }

        if self.key_map.should_open_editor(&event) {
            self.open_editor();
            return Ok(());
        }
        match event.code {
            KeyCode::Enter => self.open_editor(),
            KeyCode::Up => self.board.lock().move_selection(-1),
            KeyCode::Down => self.board.lock().move_selection(1),
            _ => {}
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if event.kind != MouseEventKind::Down(MouseButton::Left)
            || !contains(self.list_area, event.column, event.row)
        {
            return Ok(());
        }

        let index = (event.row - self.list_area.y) as usize;
        let mut board = self.board.lock();
        if index < board.visible().len() {
            board.selected = index;
        }
        Ok(())
    }

    async fn handle_overlay_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if let Some(editor) = &mut self.editor {
            editor.handle_mouse_event(event).await?;
        }
        Ok(())
    }

    async fn handle_resize(&mut self, viewport: Rect) -> Result<()> {
        if let Some(editor) = &mut self.editor {
            editor.handle_resize(viewport).await?;
        }
        Ok(())
    }

    fn advance(&mut self, now: Instant) {
        if let Some(editor) = &mut self.editor {
            editor.advance(now);
        }

        while let Ok(FieldEvent::Changed { field, value }) = self.field_events.try_recv() {
            match field.as_str() {
                "name" => self.draft.name = value,
                "category" => self.draft.category = value,
                other => debug!("Unknown field '{}'", other),
            }
        }

        let mut events = Vec::new();
        if let Some(receiver) = &mut self.editor_events {
            while let Ok(event) = receiver.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            self.handle_editor_event(event, now);
        }

        if self.saving.fire_if_due(now) {
            self.finish_save();
        } else if let (Some(remaining), Some(editor)) = (self.saving.remaining(now), &mut self.editor) {
            let total = self.saving.delay().as_secs_f64();
            editor.set_progress((1.0 - remaining.as_secs_f64() / total) * 100.0);
        }
    }

    fn render(&mut self, buf: &mut Buffer, area: Rect, theme: &Theme) {
        self.render_list(buf, area, theme);
        if let Some(editor) = &mut self.editor {
            editor.render(buf, area, theme);
        }
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn help_text(&self) -> Vec<(&str, &str)> {
        if self.editor.is_some() {
            vec![
                ("Esc", "close"),
                ("Alt+1..4", "tabs"),
                ("Tab", "search"),
                ("Ctrl+R", "reload"),
            ]
        } else {
            vec![("n", "edit skills"), ("Ctrl+C", "quit")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiSettings;
    use crate::tui::components::dialogs::DialogPhase;
    use crossterm::event::KeyModifiers;

    fn context() -> UiContext {
        UiContext::mounted(UiSettings::default(), Rect::new(0, 0, 120, 40))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(page: &mut SkillsPage, text: &str) {
        for ch in text.chars() {
            page.handle_key_event(key(KeyCode::Char(ch))).await.unwrap();
        }
    }

    #[test]
    fn test_catalog_is_categorized() {
        let catalog = skill_catalog();
        assert!(catalog.iter().all(|candidate| candidate.category.is_some()));
        assert!(catalog.iter().any(|candidate| candidate.name == "PostgreSQL"));
    }

    #[tokio::test]
    async fn test_editor_opens_and_closes() {
        let context = context();
        let mut page = SkillsPage::new(&context);

        page.handle_key_event(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(page.editor().map(|e| e.phase()), Some(DialogPhase::Open));

        page.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        page.advance(Instant::now() + Duration::from_secs(1));

        assert!(page.editor().is_none());
        assert_eq!(page.status(), Some("Editor closed"));
        assert_eq!(context.listeners.total(), 0);
        assert_eq!(context.overlays.layer_count(), 0);
    }

    #[tokio::test]
    async fn test_search_filters_list() {
        let context = context();
        let mut page = SkillsPage::new(&context);
        page.open_editor();

        page.handle_key_event(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut page, "rea").await;
        page.advance(Instant::now());

        assert_eq!(page.visible_names(), vec!["React"]);
    }

    #[tokio::test]
    async fn test_form_save_adds_skill() {
        let context = context();
        let mut page = SkillsPage::new(&context);
        page.open_editor();

        page.handle_key_event(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT))
            .await
            .unwrap();
        type_text(&mut page, "Go").await;
        page.editor_mut().unwrap().trigger_action("save");

        let start = Instant::now();
        page.advance(start);
        assert!(page.editor().unwrap().config().actions.find("save").unwrap().loading);

        page.advance(start + Duration::from_millis(300));
        assert_eq!(page.editor().unwrap().progress_percent(), 50);

        page.advance(start + Duration::from_millis(700));
        assert!(page.skill_names().contains(&"Go".to_string()));
        let editor = page.editor().unwrap();
        assert_eq!(editor.state().success.as_deref(), Some("Saved 'Go'"));
        assert_eq!(editor.progress_percent(), 100);
        assert!(!editor.config().actions.find("save").unwrap().loading);
    }

    #[tokio::test]
    async fn test_save_without_name_reports_error() {
        let context = context();
        let mut page = SkillsPage::new(&context);
        page.open_editor();

        page.editor_mut().unwrap().trigger_action("save");
        page.advance(Instant::now());

        assert_eq!(
            page.editor().unwrap().state().error.as_deref(),
            Some("Name is required")
        );
        assert_eq!(page.skill_names().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_and_refresh() {
        let context = context();
        let mut page = SkillsPage::new(&context);
        page.open_editor();

        page.editor_mut().unwrap().trigger_action("delete");
        page.advance(Instant::now());
        assert_eq!(page.skill_names(), vec!["React", "PostgreSQL"]);

        page.handle_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        page.advance(Instant::now());
        assert_eq!(page.skill_names().len(), 3);
        assert_eq!(page.editor().unwrap().state().success.as_deref(), Some("Reloaded"));
    }
}
