//! Anchored dropdown / autocomplete
//!
//! This module provides the search-as-you-type item picker used inside
//! admin forms:
//! - Candidate filtering by category and case-insensitive substring
//! - Panel placement below an anchor, recomputed on resize and scroll
//! - Inline (in-flow, compact) and portal (overlay) rendering
//! - Outside-click and blur dismissal

mod anchored;
mod filter;
mod picker;
mod position;

pub use anchored::{AnchoredDropdown, PointerTarget};
pub use filter::filter_candidates;
pub use picker::{FieldEvent, PickerField};
pub use position::AnchorPosition;

use crate::config::UiSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Display cap for viewport-anchored pickers
pub const DEFAULT_DISPLAY_CAP: usize = 20;

/// Narrowest panel, in cells
pub const MIN_PANEL_WIDTH: u16 = 24;

/// Rows between the anchor's bottom edge and the panel
pub const PANEL_GAP: u16 = 0;

/// Delay between losing focus and closing the panel
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

/// One selectable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownCandidate {
    /// Display text and match key
    pub name: String,

    /// Optional grouping used by the category filter
    pub category: Option<String>,

    /// Optional glyph shown before the name
    pub icon: Option<String>,
}

impl DropdownCandidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            icon: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Blank names can be displayed but never selected
    pub fn is_selectable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Where the panel is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownMode {
    /// Drawn into the parent's buffer and clipped by the parent's area
    Inline,
    /// Drawn into its own overlay container above everything else
    Portal,
}

/// Dropdown configuration options
#[derive(Debug, Clone)]
pub struct DropdownConfig {
    pub mode: DropdownMode,
    pub cap: usize,
    pub gap: u16,
    pub min_panel_width: u16,
    pub blur_grace: Duration,
    pub category: Option<String>,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            mode: DropdownMode::Portal,
            cap: DEFAULT_DISPLAY_CAP,
            gap: PANEL_GAP,
            min_panel_width: MIN_PANEL_WIDTH,
            blur_grace: BLUR_GRACE,
            category: None,
        }
    }
}

impl DropdownConfig {
    /// Viewport-anchored picker using the configured limits
    pub fn portal(settings: &UiSettings) -> Self {
        Self {
            mode: DropdownMode::Portal,
            cap: settings.dropdown_cap,
            gap: settings.panel_gap,
            min_panel_width: settings.min_panel_width,
            blur_grace: settings.blur_grace(),
            category: None,
        }
    }

    /// Compact in-flow picker using the configured limits
    pub fn compact(settings: &UiSettings) -> Self {
        Self {
            mode: DropdownMode::Inline,
            cap: settings.compact_cap,
            ..Self::portal(settings)
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
