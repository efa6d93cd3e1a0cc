//! Admin dialog system
//!
//! This module provides the tabbed dialog shell used by every admin flow:
//! - Open/closing lifecycle with a timed transition
//! - Keyboard shortcuts (Escape, Ctrl+R, Alt+1..9, Ctrl+U)
//! - Header search, breadcrumbs, banners and a progress bar
//! - Toolbar or floating action buttons
//!
//! Dialogs draw into their own overlay container, so they are never clipped
//! by the component that owns them.

mod admin_modal;
mod layout;
mod types;

pub use admin_modal::{AdminModal, ContentSlot};
pub use layout::ModalLayout;
pub use types::{
    normalize_breadcrumbs, progress_fill_percent, ActionButton, ActionPresentation, ActionVariant,
    Badge, BreadcrumbItem, Corner, DialogPhase, DialogState, ModalConfig, ModalError, ModalEvent,
    ModalSize, TabConfig, DEFAULT_CLOSE_DELAY,
};
