//! Core traits and types for tui-listbox
//!
//! This crate holds the vocabulary shared between a host and the widgets it
//! drives, following a frame-snapshot model: each frame the host hands a
//! widget an immutable [`FrameInput`], and the widget paints into a buffer
//! and returns the [`Requests`] it wants the host to act on.
//!
//! # Core Concepts
//!
//! - **FrameInput**: Pointer, button, click count, keys and text for one frame
//! - **Requests**: Redraw, scroll-into-view and close-popups requests
//! - **Widget**: `preferred_size` + `update(buffer, area, input)`
//! - **Theme**: Named colors and fonts, loadable from JSON
//! - **TextMeasure**: Label/icon measurement and drawing service
//! - **Keybindings**: Key strings mapped to widget commands
//! - **FrameCollector / ScrollView**: Host-side helpers for terminal apps
//!
//! # Host Loop Sketch
//!
//! ```ignore
//! let mut collector = FrameCollector::new();
//! let mut view = ScrollView::new();
//!
//! loop {
//!     for raw in pending_events() {
//!         collector.push(&raw, Instant::now());
//!     }
//!     let mut input = collector.take_frame(Instant::now());
//!     input.pointer = view.to_content(input.pointer);
//!
//!     let size = widget.preferred_size();
//!     let mut content = Buffer::empty(Rect::new(0, 0, viewport.width, size.height));
//!     let requests = widget.update(&mut content, content.area, &input);
//!
//!     if let Some(target) = requests.scroll_target() {
//!         view.ensure_visible(target, viewport.height);
//!     }
//!     terminal.draw(|frame| view.blit(&content, viewport, frame.buffer_mut()))?;
//! }
//! ```

pub mod frame;
pub mod input;
pub mod keybindings;
pub mod measure;
pub mod request;
pub mod scroll;
pub mod testing;
pub mod theme;
pub mod widget;

// Core exports
pub use frame::FrameInput;
pub use request::{Request, Requests};
pub use widget::Widget;

// Theme and measurement exports
pub use measure::{CellMeasure, TextLayout, TextMeasure};
pub use theme::{Font, Theme, ThemeConfig, ThemeError};

// Input exports
pub use input::{
    spawn_event_poller, FrameCollector, PollerConfig, RawEvent, DOUBLE_CLICK_INTERVAL,
};
pub use keybindings::{
    format_key_for_display, parse_key_string, BindingCommand, KeybindingError, Keybindings,
};
pub use scroll::ScrollView;

// Re-export ratatui types for convenience
pub use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::{Color, Modifier, Style},
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::frame::FrameInput;
    pub use crate::input::{spawn_event_poller, FrameCollector, PollerConfig, RawEvent};
    pub use crate::keybindings::{BindingCommand, Keybindings};
    pub use crate::measure::{CellMeasure, TextMeasure};
    pub use crate::request::{Request, Requests};
    pub use crate::scroll::ScrollView;
    pub use crate::theme::{Font, Theme};
    pub use crate::widget::Widget;

    pub use ratatui::{
        buffer::Buffer,
        layout::{Position, Rect, Size},
        style::{Color, Modifier, Style},
    };
}
