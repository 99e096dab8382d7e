//! Widget trait for frame-driven UI elements

use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
};

use crate::frame::FrameInput;
use crate::request::Requests;

/// A frame-driven UI element
///
/// Widgets follow these rules:
/// 1. `update` reads only its own state and the [`FrameInput`] snapshot
/// 2. Host side effects (redraw, scrolling, popups) are returned as
///    [`Requests`], never performed directly
/// 3. Painting happens inside `update`, after input has been interpreted, so
///    the buffer always reflects the state the input produced
///
/// # Example
///
/// ```ignore
/// use tui_listbox_core::{FrameInput, Request, Requests, Widget};
/// use ratatui::{buffer::Buffer, layout::{Rect, Size}};
///
/// struct Blinker { on: bool }
///
/// impl Widget for Blinker {
///     fn preferred_size(&self) -> Size {
///         Size::new(1, 1)
///     }
///
///     fn update(&mut self, buf: &mut Buffer, area: Rect, input: &FrameInput) -> Requests {
///         let mut requests = Requests::new();
///         if input.button_down {
///             self.on = !self.on;
///             requests.push(Request::Redraw);
///         }
///         buf.set_string(area.x, area.y, if self.on { "*" } else { " " }, Default::default());
///         requests
///     }
/// }
/// ```
pub trait Widget {
    /// Size the widget would like to occupy, used for layout negotiation
    fn preferred_size(&self) -> Size;

    /// Interpret one frame of input, then paint into `area` of `buf`
    fn update(&mut self, buf: &mut Buffer, area: Rect, input: &FrameInput) -> Requests;
}
