//! List item: label, optional icon, cached measurement

use ratatui::layout::Size;
use tui_listbox_core::{Font, TextLayout, TextMeasure};

/// One row of a [`List`](crate::List)
///
/// Items have no identity beyond their position in the list. The measured
/// size is cached and recomputed after [`set_label`](Self::set_label) or
/// [`set_icon`](Self::set_icon), or when the font changes.
#[derive(Debug, Clone, Default)]
pub struct ListItem {
    icon: Option<String>,
    label: String,
    layout: TextLayout,
}

impl ListItem {
    /// Create an item without icon
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            icon: None,
            label: label.into(),
            layout: TextLayout::new(),
        }
    }

    /// Create an item with an icon glyph
    pub fn with_icon(icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            ..Self::new(label)
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.layout.invalidate();
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
        self.layout.invalidate();
    }

    /// Whether the label starts with `prefix`, ignoring case
    pub fn label_starts_with(&self, prefix: &str) -> bool {
        let mut label = self.label.chars().flat_map(char::to_lowercase);
        prefix
            .chars()
            .flat_map(char::to_lowercase)
            .all(|p| label.next() == Some(p))
    }

    /// Label-only size
    pub(crate) fn size(&self, measure: &dyn TextMeasure, font: Font) -> Size {
        self.layout.size(measure, &self.label, font)
    }

    /// Icon, gap and label size
    pub(crate) fn size_icon(&self, measure: &dyn TextMeasure, font: Font, gap: u16) -> Size {
        self.layout
            .size_icon(measure, self.icon(), &self.label, font, gap)
    }

    pub(crate) fn invalidate_layout(&self) {
        self.layout.invalidate();
    }
}

impl From<&str> for ListItem {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ListItem {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}
