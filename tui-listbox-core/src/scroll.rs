//! Vertical viewport for widgets taller than the space they are given
//!
//! Hosts render a widget into an off-screen buffer sized to its preferred
//! height, apply the widget's `ScrollIntoView` requests to a [`ScrollView`],
//! and copy the visible rows into the frame with [`ScrollView::blit`].

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

/// Vertical scroll offset of a viewport over taller content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollView {
    offset: u16,
}

impl ScrollView {
    pub fn new() -> Self {
        Self::default()
    }

    /// First content row shown at the top of the viewport
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Scroll so the target rectangle (content coordinates) is visible
    ///
    /// Scrolls the minimum distance. A target taller than the viewport is
    /// aligned to its top edge.
    pub fn ensure_visible(&mut self, target: Rect, viewport_height: u16) {
        if viewport_height == 0 {
            return;
        }

        if target.y < self.offset {
            self.offset = target.y;
        } else if target.bottom() > self.offset.saturating_add(viewport_height) {
            self.offset = target
                .bottom()
                .saturating_sub(viewport_height)
                .min(target.y);
        }
    }

    /// Scroll by `delta` rows, clamped to the content
    pub fn scroll_by(&mut self, delta: i32, content_height: u16, viewport_height: u16) {
        let max = content_height.saturating_sub(viewport_height);
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(max));
        self.offset = u16::try_from(next).unwrap_or(max);
    }

    /// Keep the offset valid after the content shrank
    pub fn clamp(&mut self, content_height: u16, viewport_height: u16) {
        self.offset = self
            .offset
            .min(content_height.saturating_sub(viewport_height));
    }

    /// Map a viewport-local position to content coordinates
    pub fn to_content(&self, position: Position) -> Position {
        Position::new(position.x, position.y.saturating_add(self.offset))
    }

    /// Copy the visible part of `content` into `viewport` of `dest`
    pub fn blit(&self, content: &Buffer, viewport: Rect, dest: &mut Buffer) {
        for row in 0..viewport.height {
            for col in 0..viewport.width {
                let src = Position::new(
                    content.area.x.saturating_add(col),
                    content.area.y.saturating_add(self.offset).saturating_add(row),
                );
                let Some(cell) = content.cell(src) else {
                    continue;
                };
                if let Some(target) = dest.cell_mut((viewport.x + col, viewport.y + row)) {
                    *target = cell.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::buffer_to_string_plain;

    #[test]
    fn test_ensure_visible_scrolls_down() {
        let mut view = ScrollView::new();
        view.ensure_visible(Rect::new(0, 7, 1, 1), 5);
        assert_eq!(view.offset(), 3);
    }

    #[test]
    fn test_ensure_visible_scrolls_up() {
        let mut view = ScrollView::new();
        view.scroll_by(6, 20, 5);
        view.ensure_visible(Rect::new(0, 2, 1, 1), 5);
        assert_eq!(view.offset(), 2);
    }

    #[test]
    fn test_ensure_visible_no_move_when_visible() {
        let mut view = ScrollView::new();
        view.scroll_by(2, 20, 5);
        view.ensure_visible(Rect::new(0, 4, 1, 2), 5);
        assert_eq!(view.offset(), 2);
    }

    #[test]
    fn test_tall_target_aligned_to_top() {
        let mut view = ScrollView::new();
        view.ensure_visible(Rect::new(0, 10, 1, 8), 3);
        assert_eq!(view.offset(), 10);
    }

    #[test]
    fn test_zero_viewport_ignored() {
        let mut view = ScrollView::new();
        view.ensure_visible(Rect::new(0, 10, 1, 1), 0);
        assert_eq!(view.offset(), 0);
    }

    #[test]
    fn test_scroll_by_and_clamp() {
        let mut view = ScrollView::new();
        view.scroll_by(100, 10, 4);
        assert_eq!(view.offset(), 6);
        view.scroll_by(-100, 10, 4);
        assert_eq!(view.offset(), 0);

        view.scroll_by(6, 10, 4);
        view.clamp(5, 4);
        assert_eq!(view.offset(), 1);
    }

    #[test]
    fn test_to_content() {
        let mut view = ScrollView::new();
        view.scroll_by(3, 10, 2);
        assert_eq!(view.to_content(Position::new(1, 1)), Position::new(1, 4));
    }

    #[test]
    fn test_blit_copies_visible_rows() {
        let content = Buffer::with_lines(["aaa", "bbb", "ccc", "ddd"]);
        let mut dest = Buffer::empty(Rect::new(0, 0, 5, 3));
        let mut view = ScrollView::new();
        view.scroll_by(1, 4, 2);

        view.blit(&content, Rect::new(1, 1, 3, 2), &mut dest);
        assert_eq!(buffer_to_string_plain(&dest), "     \n bbb \n ccc ");
    }
}
