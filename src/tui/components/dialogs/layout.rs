//! Admin dialog layout calculations

use super::types::{ActionPresentation, Corner, DialogState, ModalConfig};
use crate::tui::utils::{layout::centered_rect, text};
use ratatui::layout::Rect;

/// Cells a floating button needs around its label: brackets, padding, glyph
const BUTTON_CHROME: u16 = 6;

/// Every region of an admin dialog, in viewport cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalLayout {
    /// Full available area
    pub viewport: Rect,
    /// Dialog area (including border)
    pub panel: Rect,
    pub subtitle: Option<Rect>,
    pub breadcrumb: Option<Rect>,
    pub toolbar: Option<Rect>,
    pub search: Option<Rect>,
    pub tabs: Option<Rect>,
    pub error: Option<Rect>,
    pub success: Option<Rect>,
    pub progress: Option<Rect>,
    /// Whatever is left for the active content
    pub content: Rect,
    /// Floating action cluster, drawn above the content
    pub floating: Option<Rect>,
}

impl ModalLayout {
    pub fn calculate(config: &ModalConfig, state: &DialogState, viewport: Rect) -> Self {
        let (width, height) = Self::calculate_size(config, viewport);
        let panel = centered_rect(width, height, viewport);

        let mut remaining = Rect {
            x: panel.x.saturating_add(1),
            y: panel.y.saturating_add(1),
            width: panel.width.saturating_sub(2),
            height: panel.height.saturating_sub(2),
        };

        let subtitle = config
            .subtitle
            .as_ref()
            .and_then(|_| take_row(&mut remaining, 1));
        let breadcrumb = (config.show_breadcrumb && !config.breadcrumbs.is_empty())
            .then(|| take_row(&mut remaining, 1))
            .flatten();
        let toolbar = matches!(config.actions, ActionPresentation::Toolbar(ref actions) if !actions.is_empty())
            .then(|| take_row(&mut remaining, 1))
            .flatten();
        let search = config
            .show_search
            .then(|| take_row(&mut remaining, 1))
            .flatten();
        let tabs = (!config.tabs.is_empty())
            .then(|| take_row(&mut remaining, 1))
            .flatten();
        let error = state
            .error
            .as_ref()
            .and_then(|_| take_row(&mut remaining, 1));
        let success = state
            .success
            .as_ref()
            .and_then(|_| take_row(&mut remaining, 1));
        let progress = config
            .show_progress
            .then(|| take_row(&mut remaining, 1))
            .flatten();

        let content = remaining;
        let floating = match &config.actions {
            ActionPresentation::Floating { actions, corner } if !actions.is_empty() => {
                let widest = actions
                    .iter()
                    .map(|action| text::width(&action.label))
                    .max()
                    .unwrap_or(0);
                Some(corner_rect(
                    content,
                    *corner,
                    widest.saturating_add(BUTTON_CHROME),
                    actions.len() as u16,
                ))
            }
            _ => None,
        };

        Self {
            viewport,
            panel,
            subtitle,
            breadcrumb,
            toolbar,
            search,
            tabs,
            error,
            success,
            progress,
            content,
            floating,
        }
    }

    /// Named size or explicit overrides, clamped to the viewport
    pub fn calculate_size(config: &ModalConfig, viewport: Rect) -> (u16, u16) {
        let (default_width, default_height) = config
            .size
            .dimensions()
            .unwrap_or((viewport.width, viewport.height));

        let width = config.width.unwrap_or(default_width).min(viewport.width);
        let height = config.height.unwrap_or(default_height).min(viewport.height);
        (width, height)
    }
}

fn take_row(remaining: &mut Rect, height: u16) -> Option<Rect> {
    if remaining.height == 0 {
        return None;
    }
    let height = height.min(remaining.height);
    let row = Rect { height, ..*remaining };
    remaining.y += height;
    remaining.height -= height;
    Some(row)
}

fn corner_rect(area: Rect, corner: Corner, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let right = area.right().saturating_sub(width);
    let bottom = area.bottom().saturating_sub(height);

    let (x, y) = match corner {
        Corner::TopLeft => (area.x, area.y),
        Corner::TopRight => (right, area.y),
        Corner::BottomLeft => (area.x, bottom),
        Corner::BottomRight => (right, bottom),
    };
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::dialogs::types::{ActionButton, ModalSize};

    fn state() -> DialogState {
        DialogState::default()
    }

    #[test]
    fn test_named_size_is_centered() {
        let config = ModalConfig::new("Skills").with_size(ModalSize::Small);
        let layout = ModalLayout::calculate(&config, &state(), Rect::new(0, 0, 120, 40));

        assert_eq!(layout.panel, Rect::new(35, 12, 50, 16));
        assert_eq!(layout.content, Rect::new(36, 13, 48, 14));
    }

    #[test]
    fn test_size_is_clamped_to_viewport() {
        let config = ModalConfig::new("Skills").with_size(ModalSize::Large);
        let layout = ModalLayout::calculate(&config, &state(), Rect::new(0, 0, 80, 24));
        assert_eq!(layout.panel, Rect::new(0, 0, 80, 24));

        let config = ModalConfig::new("Skills").with_size(ModalSize::Fullscreen);
        let layout = ModalLayout::calculate(&config, &state(), Rect::new(0, 0, 100, 30));
        assert_eq!(layout.panel, Rect::new(0, 0, 100, 30));
    }

    #[test]
    fn test_explicit_dimensions_override_size() {
        let config = ModalConfig::new("Skills")
            .with_size(ModalSize::Small)
            .with_dimensions(Some(30), None);
        assert_eq!(ModalLayout::calculate_size(&config, Rect::new(0, 0, 120, 40)), (30, 16));
    }

    #[test]
    fn test_header_rows_stack_above_content() {
        let mut dialog_state = state();
        dialog_state.error = Some("Save failed".to_string());
        dialog_state.success = Some("Saved".to_string());

        let config = ModalConfig::new("Skills")
            .with_size(ModalSize::Small)
            .with_subtitle("Manage skills")
            .with_search("Filter")
            .with_progress(40.0);
        let layout = ModalLayout::calculate(&config, &dialog_state, Rect::new(0, 0, 120, 40));

        assert_eq!(layout.subtitle.map(|r| r.y), Some(13));
        assert_eq!(layout.search.map(|r| r.y), Some(14));
        assert_eq!(layout.tabs, None);
        assert_eq!(layout.error.map(|r| r.y), Some(15));
        assert_eq!(layout.success.map(|r| r.y), Some(16));
        assert_eq!(layout.progress.map(|r| r.y), Some(17));
        assert_eq!(layout.content.y, 18);
        assert_eq!(layout.content.height, 9);
    }

    #[test]
    fn test_floating_cluster_sits_in_corner() {
        let config = ModalConfig::new("Skills")
            .with_size(ModalSize::Small)
            .with_floating_actions(
                vec![ActionButton::new("save", "Save"), ActionButton::new("delete", "Delete")],
                Corner::BottomRight,
            );
        let layout = ModalLayout::calculate(&config, &state(), Rect::new(0, 0, 120, 40));

        let floating = layout.floating.unwrap();
        assert_eq!(floating.width, 12);
        assert_eq!(floating.height, 2);
        assert_eq!(floating.right(), layout.content.right());
        assert_eq!(floating.bottom(), layout.content.bottom());
        assert_eq!(layout.toolbar, None);
    }
}
