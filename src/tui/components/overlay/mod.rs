//! Detached rendering for dialogs and dropdowns
//!
//! Content drawn through an [`OverlayHost`] lands in a full-viewport
//! container owned by the [`OverlayRoot`] instead of the area its component
//! was laid out in. The root composites the containers above all ordinary
//! content once per frame, so a panel is never clipped by an ancestor's area
//! or painted over by siblings drawn later.

mod host;
mod root;

pub use host::{OverlayHost, OverlaySurface};
pub use root::{transparent_cell, LayerId, OverlayError, OverlayRoot, OVERLAY_Z_INDEX, TRANSPARENT};
