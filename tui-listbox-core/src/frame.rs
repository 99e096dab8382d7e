//! Per-frame input snapshot handed to widgets

use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::layout::Position;

/// Immutable snapshot of everything a widget may read during one `update`
///
/// The host builds one of these per frame (usually through
/// [`FrameCollector`](crate::input::FrameCollector)) and passes it by
/// reference. Widgets never poll the terminal or the clock themselves, so an
/// update is a pure function of widget state and this snapshot.
///
/// Pointer coordinates are local to the widget's area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInput {
    /// Pointer position relative to the widget's top-left corner
    pub pointer: Position,
    /// Whether the primary mouse button is held this frame
    pub button_down: bool,
    /// Click count of the current press (1 = single, 2 = double, ...)
    pub click_count: u8,
    /// Key presses received this frame, in arrival order
    pub keys: Vec<KeyEvent>,
    /// Committed text input received this frame
    pub text: String,
    /// Whether the widget holds keyboard focus
    pub focused: bool,
    /// Whether the widget is the hovered target
    pub hovered: bool,
    /// Timestamp of this frame
    pub now: Instant,
}

impl FrameInput {
    /// Create an empty snapshot stamped with `now`
    pub fn new(now: Instant) -> Self {
        Self {
            pointer: Position::default(),
            button_down: false,
            click_count: 0,
            keys: Vec::new(),
            text: String::new(),
            focused: false,
            hovered: false,
            now,
        }
    }

    /// Set the widget-local pointer position
    pub fn pointer(mut self, x: u16, y: u16) -> Self {
        self.pointer = Position::new(x, y);
        self
    }

    /// Hold the primary button with the given click count
    pub fn press(mut self, click_count: u8) -> Self {
        self.button_down = true;
        self.click_count = click_count;
        self
    }

    /// Append a key press
    pub fn key(mut self, key: KeyEvent) -> Self {
        self.keys.push(key);
        self
    }

    /// Append several key presses
    pub fn keys(mut self, keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        self.keys.extend(keys);
        self
    }

    /// Append committed text
    pub fn text(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self
    }

    /// Set keyboard focus
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set hover state
    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    /// Whether anything interactive happened this frame
    pub fn is_idle(&self) -> bool {
        !self.button_down && self.keys.is_empty() && self.text.is_empty()
    }
}
