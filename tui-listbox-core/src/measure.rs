//! Text and icon measurement / drawing service
//!
//! Widgets size and paint their labels through a [`TextMeasure`]
//! implementation so hosts can substitute their own metrics. The default
//! [`CellMeasure`] counts terminal cells with `unicode-width`.

use std::cell::Cell;

use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Color,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Font;

/// Measures and draws a label with an optional leading icon
pub trait TextMeasure {
    /// Size of a label without icon
    fn size(&self, label: &str, font: Font) -> Size;

    /// Size of an icon, a gap of `gap` cells, and a label on one line.
    ///
    /// A missing or empty icon contributes neither width nor gap.
    fn size_icon(&self, icon: Option<&str>, label: &str, font: Font, gap: u16) -> Size;

    /// Draw icon and label left-aligned inside `area`.
    ///
    /// Only the foreground and font modifiers are applied; the background of
    /// the covered cells is left untouched.
    #[allow(clippy::too_many_arguments)]
    fn draw_left_icon(
        &self,
        buf: &mut Buffer,
        area: Rect,
        label: &str,
        font: Font,
        fg: Color,
        icon: Option<&str>,
        gap: u16,
    );
}

/// Terminal cell metrics: one column per narrow glyph, `font.line_height` rows
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

fn cell_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

fn visible_icon(icon: Option<&str>) -> Option<&str> {
    icon.filter(|i| !i.is_empty())
}

impl TextMeasure for CellMeasure {
    fn size(&self, label: &str, font: Font) -> Size {
        Size::new(cell_width(label), font.line_height.max(1))
    }

    fn size_icon(&self, icon: Option<&str>, label: &str, font: Font, gap: u16) -> Size {
        let label_size = self.size(label, font);
        match visible_icon(icon) {
            Some(icon) => Size::new(
                cell_width(icon)
                    .saturating_add(gap)
                    .saturating_add(label_size.width),
                label_size.height,
            ),
            None => label_size,
        }
    }

    fn draw_left_icon(
        &self,
        buf: &mut Buffer,
        area: Rect,
        label: &str,
        font: Font,
        fg: Color,
        icon: Option<&str>,
        gap: u16,
    ) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        let style = font.style(fg);
        // vertically centered inside the row
        let y = area.y + (area.height - 1) / 2;
        let mut x = area.x;

        if let Some(icon) = visible_icon(icon) {
            let (end, _) = buf.set_stringn(x, y, icon, usize::from(area.width), style);
            x = end.saturating_add(gap);
        }

        if x < area.right() {
            let remaining = usize::from(area.right() - x);
            buf.set_stringn(x, y, label, remaining, style);
        }
    }
}

/// Lazily computed measurement cache for one label
///
/// Entries remember the font they were measured with and are recomputed
/// when a different font is requested. Call [`TextLayout::invalidate`] when
/// the label or icon changes.
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    plain: Cell<Option<(Font, Size)>>,
    with_icon: Cell<Option<(Font, u16, Size)>>,
}

impl TextLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached [`TextMeasure::size`]
    pub fn size(&self, measure: &dyn TextMeasure, label: &str, font: Font) -> Size {
        if let Some((cached_font, size)) = self.plain.get() {
            if cached_font == font {
                return size;
            }
        }
        let size = measure.size(label, font);
        self.plain.set(Some((font, size)));
        size
    }

    /// Cached [`TextMeasure::size_icon`]
    pub fn size_icon(
        &self,
        measure: &dyn TextMeasure,
        icon: Option<&str>,
        label: &str,
        font: Font,
        gap: u16,
    ) -> Size {
        if let Some((cached_font, cached_gap, size)) = self.with_icon.get() {
            if cached_font == font && cached_gap == gap {
                return size;
            }
        }
        let size = measure.size_icon(icon, label, font, gap);
        self.with_icon.set(Some((font, gap, size)));
        size
    }

    /// Drop all cached measurements
    pub fn invalidate(&self) {
        self.plain.set(None);
        self.with_icon.set(None);
    }

    /// Whether any measurement is cached
    pub fn is_cached(&self) -> bool {
        self.plain.get().is_some() || self.with_icon.get().is_some()
    }
}
