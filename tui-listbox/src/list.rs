//! Single-selection list widget

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Style,
};
use tui_listbox_core::{
    theme::keys, CellMeasure, Font, FrameInput, Keybindings, Request, Requests, TextMeasure,
    Theme, Widget,
};

use crate::item::ListItem;
use crate::keymap::{default_keybindings, ListCommand};
use crate::search::TypeAhead;

/// Cells between an icon and its label
pub const ICON_GAP: u16 = 3;

/// Left inset of every row
const INSET: u16 = 2;

type Callback = Box<dyn FnMut(&ListItem)>;

/// A vertical list of items with exactly one selected row
///
/// The owner mutates items directly; the list keeps its selection pointing
/// at the same item across inserts, removals and swaps. Each frame,
/// [`Widget::update`] interprets clicks, navigation keys and typed text,
/// paints the rows and returns the requests the host should act on.
///
/// Row height is measured from the first item only, so lists mixing fonts
/// or icon sizes lay out on the first item's grid.
pub struct List {
    items: Vec<ListItem>,
    selected: usize,
    grabbed: bool,
    search: TypeAhead,
    theme: Arc<Theme>,
    measure: Box<dyn TextMeasure>,
    keybindings: Keybindings<ListCommand>,
    on_changed: Option<Callback>,
    on_action: Option<Callback>,
}

impl Default for List {
    fn default() -> Self {
        Self::new(Arc::new(Theme::default()))
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("grabbed", &self.grabbed)
            .field("search", &self.search)
            .field("keybindings", &self.keybindings)
            .field("on_changed", &self.on_changed.is_some())
            .field("on_action", &self.on_action.is_some())
            .finish_non_exhaustive()
    }
}

impl List {
    /// Create an empty list drawing with `theme`
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            grabbed: false,
            search: TypeAhead::default(),
            theme,
            measure: Box::new(CellMeasure),
            keybindings: default_keybindings(),
            on_changed: None,
            on_action: None,
        }
    }

    /// Replace the measurement service
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        for item in &self.items {
            item.invalidate_layout();
        }
        self
    }

    /// Replace the keybindings
    pub fn with_keybindings(mut self, keybindings: Keybindings<ListCommand>) -> Self {
        self.keybindings = keybindings;
        self
    }

    /// Pause after which typing starts a new search
    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search.set_timeout(timeout);
        self
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Swap the theme; takes effect on the next frame
    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
    }

    pub fn keybindings(&self) -> &Keybindings<ListCommand> {
        &self.keybindings
    }

    /// Called with the newly selected item whenever the user changes the
    /// selection
    pub fn on_changed(&mut self, f: impl FnMut(&ListItem) + 'static) {
        self.on_changed = Some(Box::new(f));
    }

    /// Called with the activated item on double click or the activate key
    pub fn on_action(&mut self, f: impl FnMut(&ListItem) + 'static) {
        self.on_action = Some(Box::new(f));
    }

    // ===== Item store =====

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut ListItem> {
        self.items.get_mut(index)
    }

    /// Index of the selected item, `None` when the list is empty
    pub fn selected(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.items.get(self.selected)
    }

    /// Select an item without notifying `on_changed`. Out of range indices
    /// select the last item.
    pub fn select(&mut self, index: usize) {
        if let Some(last) = self.items.len().checked_sub(1) {
            self.selected = index.min(last);
        }
    }

    pub fn add_item(&mut self, label: impl Into<String>) {
        self.items.push(ListItem::new(label));
    }

    pub fn add_item_icon(&mut self, icon: impl Into<String>, label: impl Into<String>) {
        self.items.push(ListItem::with_icon(icon, label));
    }

    /// Insert at `index` (clamped to the end). The selection follows the
    /// item it pointed at.
    pub fn insert_item(&mut self, index: usize, label: impl Into<String>) {
        self.insert(index, ListItem::new(label));
    }

    pub fn insert_item_icon(
        &mut self,
        index: usize,
        icon: impl Into<String>,
        label: impl Into<String>,
    ) {
        self.insert(index, ListItem::with_icon(icon, label));
    }

    fn insert(&mut self, index: usize, item: ListItem) {
        let index = index.min(self.items.len());
        let was_empty = self.items.is_empty();
        self.items.insert(index, item);
        if !was_empty && self.selected >= index {
            self.selected += 1;
        }
    }

    /// Remove the item at `index`; out of range indices are ignored
    pub fn remove_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.items.remove(index);
        if self.selected > index {
            self.selected -= 1;
        }
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    /// Swap two items; the selection follows its item
    pub fn swap_items(&mut self, i: usize, j: usize) {
        if i >= self.items.len() || j >= self.items.len() {
            return;
        }
        self.items.swap(i, j);
        if self.selected == i {
            self.selected = j;
        } else if self.selected == j {
            self.selected = i;
        }
    }

    // ===== Interaction =====

    fn text_font(&self) -> Font {
        self.theme.font(keys::TEXT)
    }

    /// Row pitch, measured from the first item's label
    fn row_height(&self, font: Font) -> u16 {
        self.items
            .first()
            .map_or(0, |item| item.size(self.measure.as_ref(), font).height)
    }

    /// Apply a user-driven selection and report it to the host
    fn change(&mut self, index: usize, row_height: u16, requests: &mut Requests) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        self.selected = index.min(last);

        let item = &self.items[self.selected];
        tracing::debug!(index = self.selected, label = item.label(), "selection changed");
        if let Some(on_changed) = self.on_changed.as_mut() {
            on_changed(item);
            requests.push(Request::Redraw);
        }

        requests.push(Request::ScrollIntoView(Rect::new(
            0,
            row_top(index, row_height),
            1,
            row_height,
        )));
    }

    fn activate(&mut self, index: usize, requests: &mut Requests) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        tracing::debug!(index, label = item.label(), "item activated");
        if let Some(on_action) = self.on_action.as_mut() {
            on_action(item);
            requests.push(Request::Redraw);
        }
    }

    fn handle_press(&mut self, input: &FrameInput, row_height: u16, requests: &mut Requests) {
        self.grabbed = true;
        if row_height == 0 {
            return;
        }

        let row = usize::from(input.pointer.y / row_height);
        if row >= self.items.len() {
            tracing::trace!(row, "press below the last item");
            return;
        }

        if row == self.selected && input.click_count == 2 {
            self.activate(row, requests);
        } else {
            self.change(row, row_height, requests);
            requests.push(Request::ClosePopups);
        }
    }

    fn handle_keys(&mut self, input: &FrameInput, row_height: u16, requests: &mut Requests) {
        for key in &input.keys {
            let Some(command) = self.keybindings.get_command(*key) else {
                continue;
            };
            match command {
                ListCommand::SelectPrevious => {
                    if self.selected > 0 {
                        self.change(self.selected - 1, row_height, requests);
                    }
                }
                ListCommand::SelectNext => {
                    if self.selected + 1 < self.items.len() {
                        self.change(self.selected + 1, row_height, requests);
                    }
                }
                ListCommand::Activate => self.activate(self.selected, requests),
            }
        }
    }

    fn handle_text(&mut self, input: &FrameInput, row_height: u16, requests: &mut Requests) {
        if input.text.is_empty() {
            return;
        }

        let prefix = self.search.push(&input.text, input.now);
        let found = self
            .items
            .iter()
            .position(|item| item.label_starts_with(prefix));
        match found {
            Some(index) => self.change(index, row_height, requests),
            None => tracing::trace!(prefix = self.search.buffer(), "no item matches"),
        }
    }

    fn render(&self, buf: &mut Buffer, area: Rect, input: &FrameInput, font: Font, row_height: u16) {
        if row_height == 0 {
            return;
        }

        let selection = if input.focused {
            self.theme.color(keys::SELECTION)
        } else {
            self.theme.color(keys::SELECTION_INACTIVE)
        };
        let hovered = self.theme.color(keys::BUTTON_HOVERED);
        let text = self.theme.color(keys::TEXT);
        let hover_active = input.hovered && !input.button_down;

        for (i, item) in self.items.iter().enumerate() {
            let y = row_top(i, row_height);
            if y >= area.height {
                break;
            }

            let row = Rect::new(INSET, y, area.width, row_height);
            let fill = if i == self.selected {
                Some(selection)
            } else if hover_active && row.contains(input.pointer) {
                Some(hovered)
            } else {
                None
            };
            if let Some(color) = fill {
                buf.set_style(to_buffer(area, row), Style::default().bg(color));
            }

            let label = Rect::new(
                INSET,
                y,
                area.width.saturating_sub(2 * INSET),
                row_height,
            );
            self.measure.draw_left_icon(
                buf,
                to_buffer(area, label),
                item.label(),
                font,
                text,
                item.icon(),
                ICON_GAP,
            );
        }
    }
}

impl Widget for List {
    fn preferred_size(&self) -> Size {
        let font = self.text_font();
        let (width, height) = self.items.iter().fold((0u16, 0u16), |(w, h), item| {
            let size = item.size_icon(self.measure.as_ref(), font, ICON_GAP);
            (w.max(size.width), h.max(size.height))
        });
        let count = u16::try_from(self.items.len()).unwrap_or(u16::MAX);
        Size::new(width, height.saturating_mul(count))
    }

    fn update(&mut self, buf: &mut Buffer, area: Rect, input: &FrameInput) -> Requests {
        let mut requests = Requests::new();
        let font = self.text_font();
        let row_height = self.row_height(font);

        if input.button_down {
            if !self.grabbed {
                self.handle_press(input, row_height, &mut requests);
            }
        } else {
            self.grabbed = false;
            self.handle_keys(input, row_height, &mut requests);
            self.handle_text(input, row_height, &mut requests);
        }

        self.render(buf, area, input, font, row_height);
        requests
    }
}

/// Top edge of row `index`, saturating at the coordinate limit
fn row_top(index: usize, row_height: u16) -> u16 {
    u16::try_from(index)
        .unwrap_or(u16::MAX)
        .saturating_mul(row_height)
}

/// Translate a widget-local rectangle into buffer coordinates, clipped to `area`
fn to_buffer(area: Rect, local: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(local.x),
        area.y.saturating_add(local.y),
        local.width,
        local.height,
    )
    .intersection(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Instant;
    use tui_listbox_core::testing::{key, RenderHarness};
    use tui_listbox_core::{assert_not_requested, assert_requested};

    fn list_of(labels: &[&str]) -> List {
        let mut list = List::default();
        for label in labels {
            list.add_item(*label);
        }
        list
    }

    fn record(sink: &Rc<RefCell<Vec<String>>>) -> impl FnMut(&ListItem) + 'static {
        let sink = Rc::clone(sink);
        move |item: &ListItem| sink.borrow_mut().push(item.label().to_string())
    }

    // ===== Item store =====

    #[test]
    fn test_insert_before_selection_shifts_it() {
        let mut list = list_of(&["a", "b", "c"]);
        list.select(1);
        list.insert_item(0, "z");
        assert_eq!(list.selected(), Some(2));
        assert_eq!(list.selected_item().map(ListItem::label), Some("b"));

        list.insert_item(2, "y");
        assert_eq!(list.selected(), Some(3));
    }

    #[test]
    fn test_insert_after_selection_keeps_it() {
        let mut list = list_of(&["a", "b"]);
        list.insert_item(1, "z");
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_insert_into_empty_and_clamped_index() {
        let mut list = List::default();
        list.insert_item(5, "first");
        assert_eq!(list.selected(), Some(0));

        list.insert_item_icon(99, "*", "last");
        assert_eq!(list.item(1).map(ListItem::label), Some("last"));
        assert_eq!(list.item(1).and_then(ListItem::icon), Some("*"));
    }

    #[test]
    fn test_remove_adjusts_selection() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        list.select(2);

        list.remove_item(3);
        assert_eq!(list.selected(), Some(2));

        list.remove_item(0);
        assert_eq!(list.selected(), Some(1));
        assert_eq!(list.selected_item().map(ListItem::label), Some("c"));

        // removing the selected last element clamps
        list.remove_item(1);
        assert_eq!(list.selected(), Some(0));

        list.remove_item(7);
        assert_eq!(list.len(), 1);

        list.remove_item(0);
        assert_eq!(list.selected(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_swap_follows_selection() {
        let mut list = list_of(&["a", "b", "c"]);
        list.swap_items(0, 2);
        assert_eq!(list.selected(), Some(2));
        list.swap_items(1, 2);
        assert_eq!(list.selected(), Some(1));
        list.swap_items(0, 2);
        assert_eq!(list.selected(), Some(1));

        let labels = |list: &List| -> Vec<String> {
            list.items().iter().map(|i| i.label().to_string()).collect()
        };
        let before = labels(&list);
        assert_eq!(before, ["b", "a", "c"]);

        // out of range is a no-op
        list.swap_items(0, 3);
        assert_eq!(labels(&list), before);
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn test_select_clamps_without_callback() {
        let changed = Rc::new(RefCell::new(Vec::new()));
        let mut list = list_of(&["a", "b"]);
        list.on_changed(record(&changed));

        list.select(10);
        assert_eq!(list.selected(), Some(1));
        assert!(changed.borrow().is_empty());
    }

    // ===== Layout =====

    #[test]
    fn test_preferred_size() {
        let mut list = list_of(&["ab", "abcd"]);
        list.add_item_icon("#", "x");
        // "#" + 3 gap + "x" = 5
        assert_eq!(list.preferred_size(), Size::new(5, 3));

        let tall = Theme::default().with_font(keys::TEXT, Font::new(Default::default(), 2));
        list.set_theme(Arc::new(tall));
        assert_eq!(list.preferred_size(), Size::new(5, 6));
    }

    #[test]
    fn test_empty_list_is_inert() {
        let mut list = List::default();
        assert_eq!(list.preferred_size(), Size::new(0, 0));

        let mut render = RenderHarness::new(10, 3);
        let now = Instant::now();
        for input in [
            FrameInput::new(now).pointer(3, 1).press(1),
            FrameInput::new(now).keys([key("down"), key("up"), key("enter")]),
            FrameInput::new(now).text("a"),
        ] {
            let requests = render.render(|buf, area| list.update(buf, area, &input));
            assert!(requests.is_empty());
        }
        assert_eq!(list.selected(), None);
    }

    // ===== Interaction =====

    #[test]
    fn test_click_selects_row_and_closes_popups() {
        let changed = Rc::new(RefCell::new(Vec::new()));
        let mut list = list_of(&["a", "b", "c"]);
        list.on_changed(record(&changed));

        let mut render = RenderHarness::new(10, 3);
        let input = FrameInput::new(Instant::now()).pointer(4, 2).press(1);
        let requests = render.render(|buf, area| list.update(buf, area, &input));

        assert_eq!(list.selected(), Some(2));
        assert_eq!(*changed.borrow(), vec!["c".to_string()]);
        assert_eq!(
            requests.into_vec(),
            vec![
                Request::Redraw,
                Request::ScrollIntoView(Rect::new(0, 2, 1, 1)),
                Request::ClosePopups,
            ]
        );
    }

    #[test]
    fn test_press_handled_once_until_release() {
        let changed = Rc::new(RefCell::new(Vec::new()));
        let mut list = list_of(&["a", "b", "c"]);
        list.on_changed(record(&changed));

        let mut render = RenderHarness::new(10, 3);
        let now = Instant::now();
        let held = FrameInput::new(now).pointer(0, 1).press(1);
        render.render(|buf, area| list.update(buf, area, &held));
        let requests = render.render(|buf, area| list.update(buf, area, &held));
        assert!(requests.is_empty());

        // keys are ignored while the button is held
        let held_key = held.clone().key(key("down"));
        render.render(|buf, area| list.update(buf, area, &held_key));
        assert_eq!(list.selected(), Some(1));

        let released = FrameInput::new(now);
        render.render(|buf, area| list.update(buf, area, &released));
        render.render(|buf, area| list.update(buf, area, &held));
        assert_eq!(changed.borrow().len(), 2);
    }

    #[test]
    fn test_press_below_items_changes_nothing() {
        let mut list = list_of(&["a", "b"]);
        let mut render = RenderHarness::new(10, 5);
        let input = FrameInput::new(Instant::now()).pointer(0, 4).press(1);
        let requests = render.render(|buf, area| list.update(buf, area, &input));
        assert!(requests.is_empty());
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_scroll_target_uses_row_height() {
        let theme = Theme::default().with_font(keys::TEXT, Font::new(Default::default(), 2));
        let mut list = List::new(Arc::new(theme));
        list.add_item("a");
        list.add_item("b");

        let mut render = RenderHarness::new(10, 4);
        let input = FrameInput::new(Instant::now()).key(key("down"));
        let requests = render.render(|buf, area| list.update(buf, area, &input));

        assert_eq!(requests.scroll_target(), Some(Rect::new(0, 2, 1, 2)));
        // no callback registered, so no redraw
        assert_not_requested!(requests, Request::Redraw);
    }

    #[test]
    fn test_activate_key_without_callback_requests_nothing() {
        let mut list = list_of(&["a"]);
        let mut render = RenderHarness::new(10, 1);
        let input = FrameInput::new(Instant::now()).key(key("enter"));
        let requests = render.render(|buf, area| list.update(buf, area, &input));
        assert!(requests.is_empty());
    }

    #[test]
    fn test_activate_key_fires_action() {
        let actions = Rc::new(RefCell::new(Vec::new()));
        let mut list = list_of(&["a", "b"]);
        list.select(1);
        list.on_action(record(&actions));

        let mut render = RenderHarness::new(10, 2);
        let input = FrameInput::new(Instant::now()).key(key("enter"));
        let requests = render.render(|buf, area| list.update(buf, area, &input));

        assert_eq!(*actions.borrow(), vec!["b".to_string()]);
        assert_requested!(requests, Request::Redraw);
    }

    #[test]
    fn test_custom_keybindings() {
        let bindings = Keybindings::new().with(ListCommand::SelectNext, &["j"]);
        let mut list = list_of(&["a", "b"]).with_keybindings(bindings);

        let mut render = RenderHarness::new(10, 2);
        let input = FrameInput::new(Instant::now()).key(key("down"));
        render.render(|buf, area| list.update(buf, area, &input));
        assert_eq!(list.selected(), Some(0));

        let input = FrameInput::new(Instant::now()).key(key("j"));
        render.render(|buf, area| list.update(buf, area, &input));
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn test_search_timeout_is_configurable() {
        let mut list = list_of(&["ab", "b", "ba"]).with_search_timeout(Duration::from_millis(50));
        let mut render = RenderHarness::new(10, 3);
        let t0 = Instant::now();

        let first = FrameInput::new(t0).text("b");
        render.render(|buf, area| list.update(buf, area, &first));
        assert_eq!(list.selected(), Some(1));

        // "ba" would match index 2, but the buffer restarted as "a"
        let late = FrameInput::new(t0 + Duration::from_millis(80)).text("a");
        render.render(|buf, area| list.update(buf, area, &late));
        assert_eq!(list.selected(), Some(0));
    }

    // ===== Rendering =====

    #[test]
    fn test_render_labels_and_icons() {
        let mut list = list_of(&["one"]);
        list.add_item_icon("*", "two");

        let mut render = RenderHarness::new(12, 3);
        let input = FrameInput::new(Instant::now());
        let output = render.render_to_string_plain(|buf, area| {
            list.update(buf, area, &input);
        });

        assert_eq!(output, "  one       \n  *   two   \n            ");
    }

    #[test]
    fn test_render_clips_long_labels() {
        let mut list = list_of(&["abcdefghij"]);
        let mut render = RenderHarness::new(8, 1);
        let input = FrameInput::new(Instant::now());
        render.render(|buf, area| list.update(buf, area, &input));
        assert_eq!(render.row(0), "  abcd  ");
    }

    #[test]
    fn test_selection_fill_follows_focus() {
        let mut list = list_of(&["a", "b"]);
        let mut render = RenderHarness::new(6, 2);

        let unfocused = FrameInput::new(Instant::now());
        render.render(|buf, area| list.update(buf, area, &unfocused));
        assert_eq!(render.buffer()[(2, 0)].bg, Color::DarkGray);
        assert_eq!(render.buffer()[(5, 0)].bg, Color::DarkGray);
        assert_eq!(render.buffer()[(1, 0)].bg, Color::Reset);
        assert_eq!(render.buffer()[(2, 1)].bg, Color::Reset);

        let focused = FrameInput::new(Instant::now()).focused(true);
        render.render(|buf, area| list.update(buf, area, &focused));
        assert_eq!(render.buffer()[(2, 0)].bg, Color::Blue);
    }

    #[test]
    fn test_hover_fill() {
        let mut list = list_of(&["a", "b"]);
        let mut render = RenderHarness::new(6, 2);

        let hover = FrameInput::new(Instant::now()).pointer(3, 1).hovered(true);
        render.render(|buf, area| list.update(buf, area, &hover));
        assert_eq!(render.buffer()[(3, 1)].bg, Color::Indexed(238));

        // inset columns are outside the row rect
        let gutter = FrameInput::new(Instant::now()).pointer(1, 1).hovered(true);
        render.render(|buf, area| list.update(buf, area, &gutter));
        assert_eq!(render.buffer()[(3, 1)].bg, Color::Reset);

        let not_hovered = FrameInput::new(Instant::now()).pointer(3, 1);
        render.render(|buf, area| list.update(buf, area, &not_hovered));
        assert_eq!(render.buffer()[(3, 1)].bg, Color::Reset);
    }

    #[test]
    fn test_render_respects_area_offset() {
        let mut list = list_of(&["a"]);
        let mut render = RenderHarness::new(8, 3);
        let input = FrameInput::new(Instant::now());
        render.render(|buf, _| list.update(buf, Rect::new(1, 1, 6, 1), &input));
        assert_eq!(render.row(1), "   a    ");
        assert_eq!(render.buffer()[(3, 1)].bg, Color::DarkGray);
        assert_eq!(render.buffer()[(7, 1)].bg, Color::Reset);
    }

    #[test]
    fn test_item_mut_relayout() {
        let mut list = list_of(&["a"]);
        assert_eq!(list.preferred_size().width, 1);
        if let Some(item) = list.item_mut(0) {
            item.set_label("abc");
        }
        assert_eq!(list.preferred_size().width, 3);
    }
}
