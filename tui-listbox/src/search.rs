//! Incremental type-ahead buffer

use std::time::{Duration, Instant};

/// Default pause after which typing starts a new search
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(1);

/// Accumulates typed text into a search prefix
///
/// Text arriving within the timeout of the previous text extends the
/// prefix; text arriving later starts a fresh one.
#[derive(Debug, Clone)]
pub struct TypeAhead {
    buffer: String,
    last: Option<Instant>,
    timeout: Duration,
}

impl Default for TypeAhead {
    fn default() -> Self {
        Self::new(SEARCH_TIMEOUT)
    }
}

impl TypeAhead {
    pub fn new(timeout: Duration) -> Self {
        Self {
            buffer: String::new(),
            last: None,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Current prefix
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Append `text` typed at `now` and return the resulting prefix
    pub fn push(&mut self, text: &str, now: Instant) -> &str {
        let expired = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) > self.timeout);
        if expired && !self.buffer.is_empty() {
            tracing::debug!(previous = %self.buffer, "type-ahead reset");
            self.buffer.clear();
        }
        self.last = Some(now);
        self.buffer.push_str(text);
        &self.buffer
    }

    /// Forget the current prefix
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.last = None;
    }
}
