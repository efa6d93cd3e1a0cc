use ratatui::layout::Rect;

/// Floating panel placement in viewport cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorPosition {
    pub top: u16,
    pub left: u16,
    pub width: u16,
}

impl AnchorPosition {
    /// Place a panel directly below `anchor`, `gap` rows down, at least
    /// `min_width` wide.
    pub fn below(anchor: Rect, gap: u16, min_width: u16) -> Self {
        Self {
            top: anchor.bottom().saturating_add(gap),
            left: anchor.left(),
            width: anchor.width.max(min_width),
        }
    }

    /// Panel rectangle for `rows` lines of content, clipped to `viewport`
    pub fn panel_rect(&self, rows: u16, viewport: Rect) -> Rect {
        let wanted = Rect {
            x: self.left,
            y: self.top,
            width: self.width,
            height: rows,
        };
        wanted.intersection(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracks_anchor_geometry() {
        let anchors = [
            Rect::new(0, 0, 10, 3),
            Rect::new(12, 5, 40, 3),
            Rect::new(3, 20, 1, 1),
            Rect::new(70, 2, 24, 3),
        ];

        for anchor in anchors {
            for gap in [0, 1, 2] {
                let position = AnchorPosition::below(anchor, gap, 24);
                assert_eq!(position.top, anchor.bottom() + gap);
                assert_eq!(position.left, anchor.left());
                assert!(position.width >= anchor.width);
                assert!(position.width >= 24);
            }
        }
    }

    #[test]
    fn test_panel_rect_is_clipped_to_viewport() {
        let viewport = Rect::new(0, 0, 80, 24);
        let position = AnchorPosition::below(Rect::new(70, 18, 20, 3), 0, 24);

        let panel = position.panel_rect(6, viewport);
        assert_eq!(panel, Rect::new(70, 21, 10, 3));
    }
}
