//! Top-layer container registry
//!
//! The root owns every attached overlay container. Each container is a cell
//! buffer covering the whole viewport. Components draw into their container
//! through an [`OverlayHost`](super::OverlayHost); at the end of the frame
//! the root composites all containers over the frame buffer in stacking
//! order.

use parking_lot::Mutex;
use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    style::{Color, Style},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stacking priority of every overlay container
pub const OVERLAY_Z_INDEX: i32 = 9999;

/// Symbol marking a cell nothing has drawn into this frame
pub const TRANSPARENT: &str = "\u{0}";

/// Identifier of an attached container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// Overlay-specific error types
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("overlay root '{0}' is not mounted")]
    RootMissing(String),
}

/// Shared handle to a container's cell buffer
pub(crate) type SharedSurface = Arc<Mutex<Buffer>>;

#[derive(Debug)]
struct LayerEntry {
    id: LayerId,
    z_index: i32,
    interactive: bool,
    surface: SharedSurface,
}

#[derive(Debug)]
struct RootState {
    id: String,
    mounted: bool,
    viewport: Rect,
    layers: Vec<LayerEntry>,
    next_id: u64,
}

/// The mount point for overlay containers
#[derive(Debug, Clone)]
pub struct OverlayRoot {
    state: Arc<Mutex<RootState>>,
}

/// A fresh cell that composites as "nothing drawn here"
pub fn transparent_cell() -> Cell {
    let mut cell = Cell::default();
    cell.set_symbol(TRANSPARENT);
    cell
}

impl OverlayRoot {
    /// Create an unmounted root
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(RootState {
                id: id.into(),
                mounted: false,
                viewport: Rect::default(),
                layers: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a root that is already mounted over `viewport`
    pub fn mounted(id: impl Into<String>, viewport: Rect) -> Self {
        let root = Self::new(id);
        root.mount(viewport);
        root
    }

    pub fn mount(&self, viewport: Rect) {
        let mut state = self.state.lock();
        state.mounted = true;
        state.viewport = viewport;
        debug!("overlay root '{}' mounted at {:?}", state.id, viewport);
    }

    /// Unmount the root, destroying every container still attached
    pub fn unmount(&self) {
        let mut state = self.state.lock();
        state.mounted = false;
        let dropped = state.layers.len();
        state.layers.clear();
        debug!("overlay root '{}' unmounted ({} layers dropped)", state.id, dropped);
    }

    pub fn is_mounted(&self) -> bool {
        self.state.lock().mounted
    }

    pub fn viewport(&self) -> Rect {
        self.state.lock().viewport
    }

    /// Attach a new full-viewport container
    pub(crate) fn attach(&self, interactive: bool) -> Result<(LayerId, SharedSurface), OverlayError> {
        let mut state = self.state.lock();
        if !state.mounted {
            return Err(OverlayError::RootMissing(state.id.clone()));
        }

        let id = LayerId(state.next_id);
        state.next_id += 1;

        let surface = Arc::new(Mutex::new(Buffer::filled(state.viewport, &transparent_cell())));
        state.layers.push(LayerEntry {
            id,
            z_index: OVERLAY_Z_INDEX,
            interactive,
            surface: surface.clone(),
        });
        debug!("{} attached to overlay root '{}'", id, state.id);

        Ok((id, surface))
    }

    /// Detach a container. Returns `false` when it was already gone.
    pub fn detach(&self, id: LayerId) -> bool {
        let mut state = self.state.lock();
        let before = state.layers.len();
        state.layers.retain(|layer| layer.id != id);
        let removed = state.layers.len() != before;
        if removed {
            debug!("{} detached from overlay root '{}'", id, state.id);
        }
        removed
    }

    /// Remove every container without going through their hosts
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.layers.len();
        state.layers.clear();
        if removed > 0 {
            warn!("overlay root '{}' cleared {} layers externally", state.id, removed);
        }
        removed
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.state.lock().layers.iter().any(|layer| layer.id == id)
    }

    pub fn layer_count(&self) -> usize {
        self.state.lock().layers.len()
    }

    /// Whether any interactive container is attached
    pub fn captures_pointer(&self) -> bool {
        self.state.lock().layers.iter().any(|layer| layer.interactive)
    }

    /// Prepare all containers for a new frame: resize them to the viewport
    /// and wipe them back to transparent.
    pub fn begin_frame(&self, viewport: Rect) {
        let mut state = self.state.lock();
        state.viewport = viewport;
        let blank = transparent_cell();
        for layer in &state.layers {
            *layer.surface.lock() = Buffer::filled(viewport, &blank);
        }
    }

    /// Draw every container over `target`, lowest stacking order first
    pub fn composite(&self, target: &mut Buffer) {
        let state = self.state.lock();
        let mut order: Vec<&LayerEntry> = state.layers.iter().collect();
        order.sort_by_key(|layer| (layer.z_index, layer.id));

        let blank_style = transparent_cell().style();
        for layer in order {
            let surface = layer.surface.lock();
            let area = surface.area.intersection(target.area);
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    let src = surface.get(x, y);
                    let dst = target.get_mut(x, y);
                    if src.symbol() != TRANSPARENT {
                        *dst = src.clone();
                        continue;
                    }
                    let style = src.style();
                    if style != blank_style {
                        dst.set_style(tint(style));
                    }
                }
            }
        }
    }

    /// Topmost interactive container that touched the cell at a point.
    ///
    /// A cell counts once its symbol or its style was written, so a tinted
    /// backdrop captures the pointer just like drawn text does.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<LayerId> {
        let state = self.state.lock();
        let blank = transparent_cell();
        let mut order: Vec<&LayerEntry> = state.layers.iter().filter(|l| l.interactive).collect();
        order.sort_by_key(|layer| (layer.z_index, layer.id));

        order.into_iter().rev().find_map(|layer| {
            let surface = layer.surface.lock();
            let area = surface.area;
            let inside = column >= area.x
                && column < area.right()
                && row >= area.y
                && row < area.bottom();
            (inside && *surface.get(column, row) != blank).then_some(layer.id)
        })
    }
}

/// Reduce a style-only cell to the parts that were actually set
fn tint(style: Style) -> Style {
    let mut patch = Style::default();
    if let Some(fg) = style.fg.filter(|color| *color != Color::Reset) {
        patch = patch.fg(fg);
    }
    if let Some(bg) = style.bg.filter(|color| *color != Color::Reset) {
        patch = patch.bg(bg);
    }
    if !style.add_modifier.is_empty() {
        patch = patch.add_modifier(style.add_modifier);
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn viewport() -> Rect {
        Rect::new(0, 0, 10, 4)
    }

    #[test]
    fn test_attach_requires_mounted_root() {
        let root = OverlayRoot::new("overlay-root");
        assert!(matches!(root.attach(true), Err(OverlayError::RootMissing(_))));

        root.mount(viewport());
        let (id, surface) = root.attach(true).unwrap();
        assert!(root.contains(id));
        assert_eq!(surface.lock().area, viewport());
    }

    #[test]
    fn test_detach_twice_reports_missing() {
        let root = OverlayRoot::mounted("overlay-root", viewport());
        let (id, _) = root.attach(false).unwrap();
        assert!(root.detach(id));
        assert!(!root.detach(id));
        assert_eq!(root.layer_count(), 0);
    }

    #[test]
    fn test_composite_keeps_untouched_cells() {
        let root = OverlayRoot::mounted("overlay-root", viewport());
        let (_, surface) = root.attach(true).unwrap();
        surface.lock().get_mut(2, 1).set_symbol("X");

        let mut target = Buffer::filled(viewport(), Cell::default().set_symbol("."));
        root.composite(&mut target);

        assert_eq!(target.get(2, 1).symbol(), "X");
        assert_eq!(target.get(0, 0).symbol(), ".");
        assert_eq!(target.get(9, 3).symbol(), ".");
    }

    #[test]
    fn test_style_only_cells_tint_content_below() {
        let root = OverlayRoot::mounted("overlay-root", viewport());
        let (_, surface) = root.attach(true).unwrap();
        surface
            .lock()
            .set_style(viewport(), Style::default().add_modifier(Modifier::DIM));

        let mut target = Buffer::filled(viewport(), Cell::default().set_symbol("a"));
        root.composite(&mut target);

        let cell = target.get(4, 2);
        assert_eq!(cell.symbol(), "a");
        assert!(cell.style().add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_style_only_cells_count_as_hits() {
        let root = OverlayRoot::mounted("overlay-root", viewport());
        assert_eq!(root.hit_test(4, 2), None);

        let (id, surface) = root.attach(true).unwrap();
        surface
            .lock()
            .set_style(Rect::new(0, 0, 5, 3), Style::default().add_modifier(Modifier::DIM));

        assert_eq!(root.hit_test(4, 2), Some(id));
        assert_eq!(root.hit_test(5, 2), None);
    }

    #[test]
    fn test_later_layers_stack_above_earlier_ones() {
        let root = OverlayRoot::mounted("overlay-root", viewport());
        let (first_id, first) = root.attach(true).unwrap();
        let (second_id, second) = root.attach(true).unwrap();
        first.lock().get_mut(0, 0).set_symbol("1");
        second.lock().get_mut(0, 0).set_symbol("2");
        first.lock().get_mut(1, 0).set_symbol("1");

        let mut target = Buffer::empty(viewport());
        root.composite(&mut target);
        assert_eq!(target.get(0, 0).symbol(), "2");

        assert_eq!(root.hit_test(0, 0), Some(second_id));
        assert_eq!(root.hit_test(1, 0), Some(first_id));
        assert_eq!(root.hit_test(5, 3), None);
    }

    #[test]
    fn test_begin_frame_wipes_and_resizes() {
        let root = OverlayRoot::mounted("overlay-root", viewport());
        let (_, surface) = root.attach(true).unwrap();
        surface.lock().get_mut(0, 0).set_symbol("X");

        let larger = Rect::new(0, 0, 20, 8);
        root.begin_frame(larger);
        let surface = surface.lock();
        assert_eq!(surface.area, larger);
        assert_eq!(surface.get(0, 0).symbol(), TRANSPARENT);
        assert_eq!(root.viewport(), larger);
    }

    #[test]
    fn test_unmount_and_clear_drop_layers() {
        let root = OverlayRoot::mounted("overlay-root", viewport());
        root.attach(true).unwrap();
        root.attach(false).unwrap();
        assert!(root.captures_pointer());
        assert_eq!(root.clear(), 2);
        assert!(!root.captures_pointer());

        root.attach(true).unwrap();
        root.unmount();
        assert_eq!(root.layer_count(), 0);
        assert!(!root.is_mounted());
    }
}
