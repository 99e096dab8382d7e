//! Single-selection list widget for ratatui buffers
//!
//! [`List`] shows a vertical column of labels, each with an optional icon,
//! and keeps exactly one of them selected. It is driven by the frame-snapshot
//! model of `tui-listbox-core`: the host passes a [`FrameInput`] to
//! [`Widget::update`], and the list interprets it, paints itself and returns
//! the [`Requests`] the host should act on.
//!
//! - Click a row to select it, double click the selected row to activate it
//! - Up/down move the selection, space/enter activate (rebindable)
//! - Typing jumps to the first label starting with the typed prefix
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//! use tui_listbox::List;
//! use tui_listbox_core::{testing::key, FrameInput, Theme, Widget};
//! use ratatui::{buffer::Buffer, layout::Rect};
//!
//! let mut list = List::new(Arc::new(Theme::default()));
//! list.add_item("Apple");
//! list.add_item_icon("*", "Banana");
//! list.on_changed(|item| println!("selected {}", item.label()));
//!
//! let area = Rect::new(0, 0, 20, 2);
//! let mut buf = Buffer::empty(area);
//! let input = FrameInput::new(Instant::now()).key(key("down"));
//! let requests = list.update(&mut buf, area, &input);
//!
//! assert_eq!(list.selected(), Some(1));
//! assert!(requests.needs_redraw());
//! ```

mod item;
mod keymap;
mod list;
mod search;

pub use item::ListItem;
pub use keymap::{default_keybindings, ListCommand};
pub use list::{List, ICON_GAP};
pub use search::{TypeAhead, SEARCH_TIMEOUT};

pub use tui_listbox_core::{FrameInput, Request, Requests, Widget};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{List, ListCommand, ListItem};
    pub use tui_listbox_core::prelude::*;
}
