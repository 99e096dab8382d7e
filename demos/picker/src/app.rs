//! Picker screen: a scrolling list above a one-line status bar

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use tui_listbox::{List, ListCommand};
use tui_listbox_core::{
    format_key_for_display, FrameCollector, RawEvent, Requests, ScrollView, Widget,
};

pub struct Picker {
    list: List,
    view: ScrollView,
    collector: FrameCollector,
    viewport: Rect,
    content_height: u16,
    chosen: Rc<RefCell<Option<String>>>,
    quit: bool,
    dirty: bool,
    /// Button went up; one more frame is needed to show it released
    released: bool,
}

impl Picker {
    pub fn new(mut list: List) -> Self {
        let chosen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&chosen);
        list.on_action(move |item| {
            *sink.borrow_mut() = Some(item.label().to_string());
        });
        list.on_changed(|item| tracing::debug!(label = item.label(), "highlight moved"));

        Self {
            list,
            view: ScrollView::new(),
            collector: FrameCollector::new(),
            viewport: Rect::default(),
            content_height: 0,
            chosen,
            quit: false,
            dirty: true,
            released: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit || self.chosen.borrow().is_some()
    }

    pub fn needs_render(&self) -> bool {
        self.dirty
    }

    /// Label of the activated item, if any
    pub fn chosen(&self) -> Option<String> {
        self.chosen.borrow().clone()
    }

    pub fn handle_event(&mut self, raw: RawEvent, now: Instant) {
        self.dirty = true;
        match &raw {
            RawEvent::Key(key) if key.kind != KeyEventKind::Release => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Esc || ctrl_c {
                    self.quit = true;
                    return;
                }
            }
            RawEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.view
                        .scroll_by(-1, self.content_height, self.viewport.height);
                    return;
                }
                MouseEventKind::ScrollDown => {
                    self.view
                        .scroll_by(1, self.content_height, self.viewport.height);
                    return;
                }
                MouseEventKind::Up(_) => self.released = true,
                _ => {}
            },
            _ => {}
        }
        self.collector.push(&raw, now);
    }

    /// Run one widget frame and paint the whole screen into `buf`
    pub fn draw(&mut self, buf: &mut Buffer, area: Rect, now: Instant) -> Requests {
        let status_height = u16::from(area.height > 1);
        self.viewport = Rect::new(
            area.x,
            area.y,
            area.width,
            area.height.saturating_sub(status_height),
        );
        self.collector.set_area(self.viewport);

        let mut input = self.collector.take_frame(now);
        input.pointer = self.view.to_content(input.pointer);

        self.content_height = self.list.preferred_size().height;
        let mut content = Buffer::empty(Rect::new(0, 0, area.width, self.content_height));
        let content_area = content.area;
        let requests = self.list.update(&mut content, content_area, &input);

        self.view.clamp(self.content_height, self.viewport.height);
        if let Some(target) = requests.scroll_target() {
            self.view.ensure_visible(target, self.viewport.height);
        }
        if requests.wants_close_popups() {
            tracing::trace!("no popups to close");
        }
        self.view.blit(&content, self.viewport, buf);

        if status_height > 0 {
            let line = self.status_line();
            let y = area.bottom() - 1;
            buf.set_stringn(
                area.x,
                y,
                line,
                usize::from(area.width),
                Style::default().add_modifier(Modifier::DIM),
            );
        }

        self.dirty = requests.needs_redraw()
            || self.collector.needs_frame()
            || std::mem::take(&mut self.released);
        requests
    }

    fn status_line(&self) -> String {
        let bindings = self.list.keybindings();
        let key = |command| {
            bindings
                .get_first_keybinding(command)
                .map(format_key_for_display)
                .unwrap_or_default()
        };
        let position = match self.list.selected() {
            Some(i) => format!("{}/{}", i + 1, self.list.len()),
            None => "0/0".to_string(),
        };
        format!(
            " {position}  {}/{} move  {} pick  type to search  Esc quit",
            key(ListCommand::SelectPrevious),
            key(ListCommand::SelectNext),
            key(ListCommand::Activate),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEvent};
    use pretty_assertions::assert_eq;
    use tui_listbox_core::testing::{buffer_row_plain, ctrl_key, key};

    fn picker(n: usize) -> Picker {
        let mut list = List::default();
        for i in 0..n {
            list.add_item(format!("line {i}"));
        }
        Picker::new(list)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> RawEvent {
        RawEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    #[test]
    fn test_keyboard_navigation_scrolls_viewport() {
        let mut app = picker(10);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 4));
        let area = buf.area;
        let now = Instant::now();
        app.draw(&mut buf, area, now);

        for _ in 0..5 {
            app.handle_event(RawEvent::Key(key("down")), now);
        }
        app.draw(&mut buf, area, now);

        // 3 list rows, selection on line 5
        assert_eq!(buffer_row_plain(&buf, 2), "  line 5            ");
        assert!(buffer_row_plain(&buf, 3).starts_with(" 6/10  ↑/↓ move"));
    }

    #[test]
    fn test_double_click_picks() {
        let mut app = picker(3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 4));
        let area = buf.area;
        let now = Instant::now();
        // the first frame tells the collector where the list is
        app.draw(&mut buf, area, now);

        for event in [
            mouse(MouseEventKind::Down(MouseButton::Left), 4, 1),
            mouse(MouseEventKind::Up(MouseButton::Left), 4, 1),
        ] {
            app.handle_event(event, now);
        }
        app.draw(&mut buf, area, now);
        assert!(app.needs_render());
        app.draw(&mut buf, area, now);
        assert!(!app.should_quit());

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 4, 1), now);
        app.draw(&mut buf, area, now);

        assert_eq!(app.chosen().as_deref(), Some("line 1"));
        assert!(app.should_quit());
    }

    #[test]
    fn test_fast_double_click_between_frames_picks() {
        let mut app = picker(3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 4));
        let area = buf.area;
        let now = Instant::now();
        app.draw(&mut buf, area, now);

        for event in [
            mouse(MouseEventKind::Down(MouseButton::Left), 4, 1),
            mouse(MouseEventKind::Up(MouseButton::Left), 4, 1),
            mouse(MouseEventKind::Down(MouseButton::Left), 4, 1),
        ] {
            app.handle_event(event, now);
        }
        while app.needs_render() && !app.should_quit() {
            app.draw(&mut buf, area, now);
        }

        assert_eq!(app.chosen().as_deref(), Some("line 1"));
    }

    #[test]
    fn test_wheel_scrolls_without_selecting() {
        let mut app = picker(10);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 4));
        let area = buf.area;
        let now = Instant::now();
        app.draw(&mut buf, area, now);

        app.handle_event(mouse(MouseEventKind::ScrollDown, 0, 0), now);
        app.handle_event(mouse(MouseEventKind::ScrollDown, 0, 0), now);
        app.draw(&mut buf, area, now);

        assert_eq!(buffer_row_plain(&buf, 0), "  line 2            ");
        assert!(buffer_row_plain(&buf, 3).starts_with(" 1/10"));
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut app = picker(2);
        app.handle_event(RawEvent::Key(key("esc")), Instant::now());
        assert!(app.should_quit());
        assert_eq!(app.chosen(), None);

        let mut app = picker(2);
        app.handle_event(RawEvent::Key(ctrl_key('c')), Instant::now());
        assert!(app.should_quit());
    }
}
