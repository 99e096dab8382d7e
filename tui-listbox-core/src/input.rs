//! Collecting crossterm events into per-frame snapshots

use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::frame::FrameInput;

/// Default window in which a second press counts as a double click
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Raw event from crossterm before it is folded into a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Paste(String),
    Focus(bool),
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy)]
struct QueuedPress {
    clicks: u8,
    inside: bool,
    released: bool,
}

/// Folds raw events into [`FrameInput`] snapshots
///
/// The collector tracks the state that only exists across events: whether
/// the primary button is held, how many clicks the current press counts,
/// and where the pointer is. Call [`push`](Self::push) for every event and
/// [`take_frame`](Self::take_frame) once per frame.
///
/// A press that is released before the frame is taken is still reported as
/// held for exactly one frame, so quick clicks are never lost. A second press
/// arriving before that release was reported is queued behind one frame with
/// the button up, so widgets see both presses of a fast double click.
#[derive(Debug, Clone)]
pub struct FrameCollector {
    /// Widget area in screen coordinates
    area: Rect,
    /// Pointer position in screen coordinates
    pointer: Position,
    button_down: bool,
    /// Press began inside `area`
    press_inside: bool,
    release_pending: bool,
    click_count: u8,
    /// Time, cell and click count of the latest press
    last_click: Option<(Instant, Position, u8)>,
    /// Press that arrived before the previous release was reported
    queued_press: Option<QueuedPress>,
    /// A queued press became current and has not been reported yet
    press_unreported: bool,
    double_click: Duration,
    keys: Vec<KeyEvent>,
    text: String,
    focused: bool,
}

impl Default for FrameCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCollector {
    /// Create a collector with the default double-click interval
    pub fn new() -> Self {
        Self {
            area: Rect::default(),
            pointer: Position::default(),
            button_down: false,
            press_inside: false,
            release_pending: false,
            click_count: 0,
            last_click: None,
            queued_press: None,
            press_unreported: false,
            double_click: DOUBLE_CLICK_INTERVAL,
            keys: Vec::new(),
            text: String::new(),
            focused: true,
        }
    }

    /// Set the double-click interval (builder pattern)
    pub fn with_double_click(mut self, interval: Duration) -> Self {
        self.double_click = interval;
        self
    }

    /// Set the screen area of the widget the frames are built for
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Set whether the widget holds keyboard focus
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Fold one raw event into the pending frame
    pub fn push(&mut self, event: &RawEvent, now: Instant) {
        match event {
            RawEvent::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                self.keys.push(*key);
                if let event::KeyCode::Char(c) = key.code {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        self.text.push(c);
                    }
                }
            }
            RawEvent::Mouse(mouse) => {
                self.pointer = Position::new(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => self.press(now),
                    MouseEventKind::Up(MouseButton::Left) => self.release(),
                    _ => {}
                }
            }
            RawEvent::Paste(text) => self.text.push_str(text),
            RawEvent::Focus(focused) => self.focused = *focused,
            RawEvent::Resize(_, _) => {}
        }
    }

    fn press(&mut self, now: Instant) {
        let clicks = match self.last_click {
            Some((at, pos, count))
                if pos == self.pointer
                    && now.saturating_duration_since(at) <= self.double_click =>
            {
                count.saturating_add(1)
            }
            _ => 1,
        };
        self.last_click = Some((now, self.pointer, clicks));
        let inside = self.area.contains(self.pointer);
        trace!(clicks, inside, "button pressed");

        if self.release_pending || self.queued_press.is_some() {
            // the earlier press still owes a released frame
            self.queued_press = Some(QueuedPress {
                clicks,
                inside,
                released: false,
            });
            return;
        }

        self.click_count = clicks;
        self.button_down = true;
        self.press_inside = inside;
    }

    fn release(&mut self) {
        if let Some(queued) = self.queued_press.as_mut() {
            queued.released = true;
        } else if self.button_down {
            // reported as held until the current frame is taken
            self.release_pending = true;
        }
    }

    /// Whether buffered button state still needs another frame to be seen
    pub fn needs_frame(&self) -> bool {
        self.release_pending || self.queued_press.is_some() || self.press_unreported
    }

    /// Build the snapshot for this frame and reset per-frame state
    pub fn take_frame(&mut self, now: Instant) -> FrameInput {
        let hovered = self.area.contains(self.pointer);
        let pointer = Position::new(
            self.pointer.x.saturating_sub(self.area.x),
            self.pointer.y.saturating_sub(self.area.y),
        );

        let frame = FrameInput {
            pointer,
            button_down: self.button_down && self.press_inside,
            click_count: self.click_count,
            keys: std::mem::take(&mut self.keys),
            text: std::mem::take(&mut self.text),
            focused: self.focused,
            hovered,
            now,
        };
        self.press_unreported = false;

        if self.release_pending {
            self.button_down = false;
            self.release_pending = false;
        } else if let Some(queued) = self.queued_press.take() {
            // this frame showed the button up, the next one shows the press
            self.click_count = queued.clicks;
            self.button_down = true;
            self.press_inside = queued.inside;
            self.release_pending = queued.released;
            self.press_unreported = true;
        }

        frame
    }
}

/// Timing of the crossterm polling task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Timeout of each `crossterm::event::poll` call
    pub poll_timeout: Duration,
    /// Pause between polling rounds
    pub loop_sleep: Duration,
    /// Events forwarded per round before yielding
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
            max_batch: 20,
        }
    }
}

/// Poll crossterm on a tokio task and forward events as [`RawEvent`]s
///
/// The task ends when `cancel` fires (discarding whatever crossterm still
/// buffers) or when the receiving side of `tx` is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let dropped = discard_buffered();
                    info!(dropped, "event poller cancelled");
                    return;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    if !forward_ready(&tx, &config) {
                        debug!("event channel closed, poller exiting");
                        return;
                    }
                }
            }
        }
    })
}

/// Forward up to one batch of ready events; false once the channel is closed
fn forward_ready(tx: &mpsc::UnboundedSender<RawEvent>, config: &PollerConfig) -> bool {
    for _ in 0..config.max_batch {
        if !event::poll(config.poll_timeout).unwrap_or(false) {
            break;
        }
        let Ok(evt) = event::read() else {
            continue;
        };
        if tx.send(RawEvent::from(evt)).is_err() {
            return false;
        }
    }
    !tx.is_closed()
}

fn discard_buffered() -> usize {
    let mut dropped = 0;
    while event::poll(Duration::ZERO).unwrap_or(false) {
        if event::read().is_ok() {
            dropped += 1;
        }
    }
    dropped
}

impl From<event::Event> for RawEvent {
    fn from(evt: event::Event) -> Self {
        match evt {
            event::Event::Key(key) => RawEvent::Key(key),
            event::Event::Mouse(mouse) => RawEvent::Mouse(mouse),
            event::Event::Paste(text) => RawEvent::Paste(text),
            event::Event::FocusGained => RawEvent::Focus(true),
            event::Event::FocusLost => RawEvent::Focus(false),
            event::Event::Resize(w, h) => RawEvent::Resize(w, h),
        }
    }
}
