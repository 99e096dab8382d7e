//! Test utilities for widgets built on tui-listbox-core
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+p")`)
//! - [`RenderHarness`]: Off-screen buffer for render tests
//! - [`buffer_to_string_plain`]: Dump a buffer's symbols, one line per row
//! - Assertion macros for verifying requests a widget returned
//!
//! # Example
//!
//! ```ignore
//! use tui_listbox_core::testing::{key, RenderHarness};
//! use tui_listbox_core::{assert_requested, FrameInput, Request, Widget};
//!
//! let mut render = RenderHarness::new(20, 5);
//! let input = FrameInput::new(Instant::now()).key(key("down"));
//! let requests = render.render(|buf, area| list.update(buf, area, &input));
//!
//! assert_requested!(requests, Request::ScrollIntoView(_));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect};

use crate::keybindings::parse_key_string;

/// Create a `KeyEvent` from a key string.
///
/// This is a convenience wrapper around [`parse_key_string`] that panics
/// if the key string is invalid, making it suitable for use in tests.
///
/// # Examples
///
/// ```
/// use tui_listbox_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("q");
/// assert_eq!(k.code, KeyCode::Char('q'));
///
/// let k = key("ctrl+p");
/// assert_eq!(k.code, KeyCode::Char('p'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create `KeyEvent`s from a whitespace-separated key string list.
///
/// ```
/// use tui_listbox_core::testing::keys;
/// use crossterm::event::KeyCode;
///
/// let ks = keys("down down enter");
/// assert_eq!(ks.len(), 3);
/// assert_eq!(ks[2].code, KeyCode::Enter);
/// ```
pub fn keys(s: &str) -> Vec<KeyEvent> {
    s.split_whitespace().map(key).collect()
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Create a `KeyEvent` for a character with Alt modifier.
pub fn alt_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
}

/// Dump a buffer's symbols without styling, rows joined by `\n`
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| buffer_row_plain(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Dump one buffer row without styling
pub fn buffer_row_plain(buffer: &Buffer, y: u16) -> String {
    let area = buffer.area;
    (area.left()..area.right())
        .filter_map(|x| buffer.cell((x, y)))
        .map(|cell| cell.symbol())
        .collect()
}

/// Off-screen buffer for render tests
///
/// Each [`render`](Self::render) call starts from a blank buffer, mirroring
/// a host that clears the frame before painting.
pub struct RenderHarness {
    buffer: Buffer,
}

impl RenderHarness {
    /// Create a harness with a `width` x `height` buffer at the origin
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
        }
    }

    /// The full buffer area
    pub fn area(&self) -> Rect {
        self.buffer.area
    }

    /// Clear the buffer, then run `f` against it
    pub fn render<R>(&mut self, f: impl FnOnce(&mut Buffer, Rect) -> R) -> R {
        self.buffer.reset();
        let area = self.buffer.area;
        f(&mut self.buffer, area)
    }

    /// Render and return the plain-text dump
    pub fn render_to_string_plain(&mut self, f: impl FnOnce(&mut Buffer, Rect)) -> String {
        self.render(f);
        buffer_to_string_plain(&self.buffer)
    }

    /// The buffer as left by the last render
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// One row of the last render, without styling
    pub fn row(&self, y: u16) -> String {
        buffer_row_plain(&self.buffer, y)
    }
}

/// Assert that a specific request was made.
///
/// # Example
///
/// ```ignore
/// let requests = list.update(buf, area, &input);
/// assert_requested!(requests, Request::Redraw);
/// assert_requested!(requests, Request::ScrollIntoView(r) if r.y == 3);
/// ```
#[macro_export]
macro_rules! assert_requested {
    ($requests:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $requests.iter().any(|r| matches!(r, $pattern $(if $guard)?)),
            "Expected request matching `{}`, but got: {:?}",
            stringify!($pattern),
            $requests
        );
    };
}

/// Assert that a specific request was NOT made.
#[macro_export]
macro_rules! assert_not_requested {
    ($requests:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$requests.iter().any(|r| matches!(r, $pattern $(if $guard)?)),
            "Expected NO request matching `{}`, but got: {:?}",
            stringify!($pattern),
            $requests
        );
    };
}

/// Count how many requests match a pattern.
#[macro_export]
macro_rules! count_requested {
    ($requests:expr, $pattern:pat $(if $guard:expr)?) => {
        $requests.iter().filter(|r| matches!(r, $pattern $(if $guard)?)).count()
    };
}
