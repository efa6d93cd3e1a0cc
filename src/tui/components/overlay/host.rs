//! Lifecycle-bound overlay container

use super::root::{LayerId, OverlayError, OverlayRoot, SharedSurface};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{StatefulWidget, Widget},
};
use tracing::{debug, warn};

/// Owns at most one overlay container on an [`OverlayRoot`].
///
/// The container exists between [`activate`](Self::activate) and
/// [`deactivate`](Self::deactivate) (or drop). While it exists, content drawn
/// through [`draw`](Self::draw) covers the whole viewport regardless of the
/// area the owning component was given.
#[derive(Debug)]
pub struct OverlayHost {
    root: OverlayRoot,
    label: &'static str,
    layer: Option<(LayerId, SharedSurface)>,
}

impl OverlayHost {
    /// Create an inactive host; its container captures the pointer once attached
    pub fn new(root: OverlayRoot, label: &'static str) -> Self {
        Self {
            root,
            label,
            layer: None,
        }
    }

    pub fn root(&self) -> &OverlayRoot {
        &self.root
    }

    /// Create and attach the container. Calling it again while active is a no-op.
    pub fn activate(&mut self) -> Result<LayerId, OverlayError> {
        if let Some((id, _)) = &self.layer {
            if self.root.contains(*id) {
                return Ok(*id);
            }
            // Removed behind our back; start over with a fresh container.
            self.layer = None;
        }

        match self.root.attach(true) {
            Ok((id, surface)) => {
                debug!("{} overlay activated as {}", self.label, id);
                self.layer = Some((id, surface));
                Ok(id)
            }
            Err(err) => {
                warn!("{} overlay not attached: {}", self.label, err);
                Err(err)
            }
        }
    }

    /// Detach and destroy the container. Returns whether a container was detached.
    pub fn deactivate(&mut self) -> bool {
        let Some((id, _)) = self.layer.take() else {
            return false;
        };

        if self.root.detach(id) {
            debug!("{} overlay deactivated ({})", self.label, id);
            true
        } else {
            debug!("{} overlay {} was already detached", self.label, id);
            false
        }
    }

    /// Whether the container is attached right now
    pub fn is_active(&self) -> bool {
        self.layer
            .as_ref()
            .is_some_and(|(id, _)| self.root.contains(*id))
    }

    pub fn layer_id(&self) -> Option<LayerId> {
        self.layer.as_ref().map(|(id, _)| *id)
    }

    /// Render into the container. Does nothing when no container is attached.
    ///
    /// Returns whether the closure ran.
    pub fn draw<F>(&self, draw: F) -> bool
    where
        F: FnOnce(&mut OverlaySurface<'_>),
    {
        let Some((id, surface)) = &self.layer else {
            return false;
        };
        if !self.root.contains(*id) {
            return false;
        }

        let mut buffer = surface.lock();
        let viewport = buffer.area;
        let mut target = OverlaySurface {
            buffer: &mut *buffer,
            viewport,
        };
        draw(&mut target);
        true
    }
}

impl Drop for OverlayHost {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// Drawing target handed out by [`OverlayHost::draw`]
pub struct OverlaySurface<'a> {
    buffer: &'a mut Buffer,
    viewport: Rect,
}

impl<'a> OverlaySurface<'a> {
    /// The full viewport the container covers
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut *self.buffer
    }

    /// Render a widget, clipped to the viewport
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        let area = area.intersection(self.viewport);
        if area.width == 0 || area.height == 0 {
            return;
        }
        widget.render(area, self.buffer);
    }

    pub fn render_stateful_widget<W: StatefulWidget>(
        &mut self,
        widget: W,
        area: Rect,
        state: &mut W::State,
    ) {
        let area = area.intersection(self.viewport);
        if area.width == 0 || area.height == 0 {
            return;
        }
        widget.render(area, self.buffer, state);
    }

    /// Apply a style without drawing symbols, tinting whatever lies below
    pub fn tint(&mut self, area: Rect, style: Style) {
        let area = area.intersection(self.viewport);
        self.buffer.set_style(area, style);
    }
}
