//! Requests a widget hands back to its host
//!
//! A widget never calls into the host directly. Instead, `update` returns a
//! [`Requests`] list describing the work the host should do after the frame:
//!
//! ```
//! use tui_listbox_core::{Request, Requests};
//! use ratatui::layout::Rect;
//!
//! let mut requests = Requests::new();
//! requests.push(Request::Redraw);
//! requests.push(Request::ScrollIntoView(Rect::new(0, 4, 1, 1)));
//!
//! assert!(requests.needs_redraw());
//! assert_eq!(requests.scroll_target(), Some(Rect::new(0, 4, 1, 1)));
//! ```

use ratatui::layout::Rect;

/// A single host request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Paint another frame even if no input arrives
    Redraw,
    /// Scroll the enclosing viewport so the rectangle is visible.
    ///
    /// The rectangle is in widget-local coordinates. A width of 1 means only
    /// vertical visibility matters.
    ScrollIntoView(Rect),
    /// Close any transient popups the host has open
    ClosePopups,
}

/// Ordered list of requests produced by one `update` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requests {
    requests: Vec<Request>,
}

impl Requests {
    /// Create an empty request list
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request
    #[inline]
    pub fn push(&mut self, request: Request) {
        self.requests.push(request);
    }

    /// Append all requests from another list
    pub fn extend(&mut self, other: Requests) {
        self.requests.extend(other.requests);
    }

    /// Whether no request was made
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Number of requests
    #[inline]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Iterate over requests in the order they were made
    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    /// Whether the given request was made
    pub fn contains(&self, request: &Request) -> bool {
        self.requests.contains(request)
    }

    /// Whether a redraw was requested
    pub fn needs_redraw(&self) -> bool {
        self.contains(&Request::Redraw)
    }

    /// Whether the host should close its popups
    pub fn wants_close_popups(&self) -> bool {
        self.contains(&Request::ClosePopups)
    }

    /// The last scroll-into-view rectangle, if any.
    ///
    /// Later requests supersede earlier ones within a frame.
    pub fn scroll_target(&self) -> Option<Rect> {
        self.requests.iter().rev().find_map(|r| match r {
            Request::ScrollIntoView(rect) => Some(*rect),
            _ => None,
        })
    }

    /// Consume the list into a plain vector
    pub fn into_vec(self) -> Vec<Request> {
        self.requests
    }
}

impl IntoIterator for Requests {
    type Item = Request;
    type IntoIter = std::vec::IntoIter<Request>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.into_iter()
    }
}

impl<'a> IntoIterator for &'a Requests {
    type Item = &'a Request;
    type IntoIter = std::slice::Iter<'a, Request>;

    fn into_iter(self) -> Self::IntoIter {
        self.requests.iter()
    }
}

impl FromIterator<Request> for Requests {
    fn from_iter<T: IntoIterator<Item = Request>>(iter: T) -> Self {
        Self {
            requests: iter.into_iter().collect(),
        }
    }
}
