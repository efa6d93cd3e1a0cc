//! Shared handles every overlay-aware component is built with

use crate::config::UiSettings;
use crate::tui::components::overlay::OverlayRoot;
use crate::tui::listeners::ListenerRegistry;
use ratatui::layout::Rect;

/// Root id of the application's overlay mount point
pub const OVERLAY_ROOT_ID: &str = "overlay-root";

#[derive(Debug, Clone)]
pub struct UiContext {
    pub overlays: OverlayRoot,
    pub listeners: ListenerRegistry,
    pub settings: UiSettings,
}

impl UiContext {
    /// Context with an unmounted overlay root
    pub fn new(settings: UiSettings) -> Self {
        Self {
            overlays: OverlayRoot::new(OVERLAY_ROOT_ID),
            listeners: ListenerRegistry::new(),
            settings,
        }
    }

    /// Context whose overlay root is already mounted over `viewport`
    pub fn mounted(settings: UiSettings, viewport: Rect) -> Self {
        let context = Self::new(settings);
        context.overlays.mount(viewport);
        context
    }
}
