//! Core admin dialog types
//!
//! Configuration data supplied by consumers (tabs, actions, breadcrumbs,
//! sizing) and the events a dialog reports back.

use crate::config::UiSettings;
use crate::tui::components::Component;
use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Default length of the closing transition
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Small badge shown next to a tab label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    Text(String),
    Count(u64),
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Badge::Text(text) => write!(f, "{}", text),
            Badge::Count(count) => write!(f, "{}", count),
        }
    }
}

/// One tab of a dialog
pub struct TabConfig {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub content: Box<dyn Component>,
    pub badge: Option<Badge>,
    pub disabled: bool,
    pub tooltip: Option<String>,
}

impl TabConfig {
    pub fn new(id: impl Into<String>, label: impl Into<String>, content: impl Component + 'static) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            content: Box::new(content),
            badge: None,
            disabled: false,
            tooltip: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl fmt::Debug for TabConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabConfig")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("badge", &self.badge)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Success,
}

/// A dialog action; activation is reported as [`ModalEvent::ActionTriggered`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub variant: ActionVariant,
    pub disabled: bool,
    pub loading: bool,
    pub tooltip: Option<String>,
}

impl ActionButton {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            variant: ActionVariant::default(),
            disabled: false,
            loading: false,
            tooltip: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Loading buttons are as inert as disabled ones
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.loading
    }
}

/// One step of the breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub clickable: bool,
    pub active: bool,
}

impl BreadcrumbItem {
    /// Static, non-clickable item
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            clickable: false,
            active: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }
}

/// Keep at most one active breadcrumb, the first one flagged
pub fn normalize_breadcrumbs(items: &mut [BreadcrumbItem]) {
    let mut seen_active = false;
    for item in items.iter_mut().filter(|item| item.active) {
        if seen_active {
            warn!("Breadcrumb '{}' demoted: only one item can be active", item.id);
            item.active = false;
        }
        seen_active = true;
    }
}

/// Named dialog sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
    Fullscreen,
}

impl ModalSize {
    /// Default (width, height) in cells; `None` means the whole viewport
    pub fn dimensions(&self) -> Option<(u16, u16)> {
        match self {
            ModalSize::Small => Some((50, 16)),
            ModalSize::Medium => Some((80, 24)),
            ModalSize::Large => Some((110, 32)),
            ModalSize::Fullscreen => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

/// How a dialog's actions are laid out
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionPresentation {
    #[default]
    None,
    /// A row under the header
    Toolbar(Vec<ActionButton>),
    /// A stacked cluster pinned to a panel corner
    Floating {
        actions: Vec<ActionButton>,
        corner: Corner,
    },
}

impl ActionPresentation {
    pub fn actions(&self) -> &[ActionButton] {
        match self {
            ActionPresentation::None => &[],
            ActionPresentation::Toolbar(actions) => actions,
            ActionPresentation::Floating { actions, .. } => actions,
        }
    }

    pub fn actions_mut(&mut self) -> &mut [ActionButton] {
        match self {
            ActionPresentation::None => &mut [],
            ActionPresentation::Toolbar(actions) => actions,
            ActionPresentation::Floating { actions, .. } => actions,
        }
    }

    pub fn find(&self, id: &str) -> Option<&ActionButton> {
        self.actions().iter().find(|action| action.id == id)
    }
}

/// Events reported by an admin dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// The closing transition finished
    Closed,
    /// A different tab became active
    TabChanged(String),
    /// Ctrl+R
    Refresh,
    /// A key the dialog saw while open
    Shortcut(KeyEvent),
    /// The search text changed
    SearchChanged(String),
    /// An action button was activated
    ActionTriggered(String),
    /// A clickable breadcrumb was selected
    BreadcrumbSelected(String),
}

/// Dialog-specific error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("Tab id '{0}' is used more than once")]
    DuplicateTab(String),

    #[error("Tab ids must not be empty")]
    EmptyTabId,
}

/// Lifecycle phase of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Open,
    Closing,
}

/// Runtime state owned by a dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogState {
    pub phase: DialogPhase,
    pub active_tab_id: Option<String>,
    pub search_text: String,
    pub search_focused: bool,
    pub progress: f64,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        self.phase == DialogPhase::Open
    }

    pub fn is_closing(&self) -> bool {
        self.phase == DialogPhase::Closing
    }

    /// Open or closing; the dialog is on screen
    pub fn is_mounted(&self) -> bool {
        self.phase != DialogPhase::Closed
    }
}

/// Progress bar fill, in whole percent
pub fn progress_fill_percent(progress: f64) -> u16 {
    if progress.is_nan() {
        return 0;
    }
    progress.clamp(0.0, 100.0).round() as u16
}

/// Dialog configuration options
pub struct ModalConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub tabs: Vec<TabConfig>,
    pub active_tab: Option<String>,
    pub children: Option<Box<dyn Component>>,
    pub actions: ActionPresentation,
    pub size: ModalSize,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub prevent_close: bool,
    pub show_progress: bool,
    pub progress: f64,
    pub refresh_enabled: bool,
    pub forward_shortcuts: bool,
    pub show_search: bool,
    pub search_value: String,
    pub search_placeholder: String,
    pub show_breadcrumb: bool,
    pub breadcrumbs: Vec<BreadcrumbItem>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub close_delay: Duration,
}

impl ModalConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            icon: None,
            tabs: Vec::new(),
            active_tab: None,
            children: None,
            actions: ActionPresentation::None,
            size: ModalSize::default(),
            width: None,
            height: None,
            prevent_close: false,
            show_progress: false,
            progress: 0.0,
            refresh_enabled: false,
            forward_shortcuts: false,
            show_search: false,
            search_value: String::new(),
            search_placeholder: "Search...".to_string(),
            show_breadcrumb: false,
            breadcrumbs: Vec::new(),
            error: None,
            success: None,
            close_delay: DEFAULT_CLOSE_DELAY,
        }
    }

    /// Take timing from the application settings
    pub fn with_settings(mut self, settings: &UiSettings) -> Self {
        self.close_delay = settings.close_delay();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_tab(mut self, tab: TabConfig) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn with_active_tab(mut self, id: impl Into<String>) -> Self {
        self.active_tab = Some(id.into());
        self
    }

    /// Content shown when no tab applies
    pub fn with_children(mut self, children: impl Component + 'static) -> Self {
        self.children = Some(Box::new(children));
        self
    }

    pub fn with_toolbar(mut self, actions: Vec<ActionButton>) -> Self {
        self.actions = ActionPresentation::Toolbar(actions);
        self
    }

    pub fn with_floating_actions(mut self, actions: Vec<ActionButton>, corner: Corner) -> Self {
        self.actions = ActionPresentation::Floating { actions, corner };
        self
    }

    pub fn with_size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    /// Explicit dimensions override the named size
    pub fn with_dimensions(mut self, width: Option<u16>, height: Option<u16>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn prevent_close(mut self, prevent: bool) -> Self {
        self.prevent_close = prevent;
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.show_progress = true;
        self.progress = progress;
        self
    }

    pub fn with_refresh(mut self, enabled: bool) -> Self {
        self.refresh_enabled = enabled;
        self
    }

    pub fn forward_shortcuts(mut self, forward: bool) -> Self {
        self.forward_shortcuts = forward;
        self
    }

    pub fn with_search(mut self, placeholder: impl Into<String>) -> Self {
        self.show_search = true;
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn with_search_value(mut self, value: impl Into<String>) -> Self {
        self.search_value = value.into();
        self
    }

    pub fn with_breadcrumbs(mut self, items: Vec<BreadcrumbItem>) -> Self {
        self.show_breadcrumb = true;
        self.breadcrumbs = items;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_success(mut self, success: impl Into<String>) -> Self {
        self.success = Some(success.into());
        self
    }

    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Reject tab sets a dialog cannot address unambiguously
    pub fn validate(&self) -> Result<(), ModalError> {
        let mut seen = HashSet::new();
        for tab in &self.tabs {
            if tab.id.is_empty() {
                return Err(ModalError::EmptyTabId);
            }
            if !seen.insert(tab.id.as_str()) {
                return Err(ModalError::DuplicateTab(tab.id.clone()));
            }
        }
        Ok(())
    }
}
