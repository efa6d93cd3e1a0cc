use ratatui::layout::Rect;

/// Layout utilities for TUI components
pub mod layout {
    use super::*;

    /// Create a centered rectangle with given width and height, clamped to the area
    pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);

        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    /// Whether a cell position lies inside a rectangle
    pub fn contains(area: Rect, column: u16, row: u16) -> bool {
        column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
    }
}

/// Text width helpers
pub mod text {
    use unicode_width::UnicodeWidthStr;

    /// Display width of a string in terminal cells
    pub fn width(text: &str) -> u16 {
        UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
    }

    /// Truncate to `max` cells, appending an ellipsis when something was cut
    pub fn truncate(text: &str, max: u16) -> String {
        if width(text) <= max {
            return text.to_string();
        }
        if max == 0 {
            return String::new();
        }

        let mut out = String::new();
        let mut used = 0u16;
        for ch in text.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
            if used + ch_width + 1 > max {
                break;
            }
            out.push(ch);
            used += ch_width;
        }
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = layout::centered_rect(80, 24, area);
        assert_eq!(rect, area);

        let rect = layout::centered_rect(20, 4, area);
        assert_eq!(rect, Rect::new(10, 3, 20, 4));
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(2, 2, 3, 3);
        assert!(layout::contains(area, 2, 2));
        assert!(layout::contains(area, 4, 4));
        assert!(!layout::contains(area, 5, 4));
        assert!(!layout::contains(area, 1, 2));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(text::truncate("Rust", 10), "Rust");
        assert_eq!(text::truncate("TypeScript", 5), "Type…");
        assert_eq!(text::truncate("abc", 0), "");
    }
}
