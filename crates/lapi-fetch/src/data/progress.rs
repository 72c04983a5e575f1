use std::fmt;
use std::sync::Arc;

/// Observer invoked synchronously by [`ProgressState::report`].
pub type ProgressCallback = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// Which side of a transfer the counters currently describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Downloading a response body.
    Receive,
    /// Uploading a request body.
    Send,
    /// Every counter is zero.
    Idle,
}

/// Immutable copy of a [`ProgressState`] handed to observers.
///
/// Counters are tri-state: `None` is unknown (for example a response without
/// `Content-Length`), which is distinct from a known total of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub bytes_received:   Option<u64>,
    pub total_to_receive: Option<u64>,
    pub bytes_sent:       Option<u64>,
    pub total_to_send:    Option<u64>,
    pub in_progress:      bool,
}

impl ProgressSnapshot {
    /// A counter that is unknown or non-zero marks its side as active.
    #[must_use]
    pub fn direction(&self) -> Direction {
        let live = |c: Option<u64>| c != Some(0);
        if live(self.bytes_received) || live(self.total_to_receive) {
            Direction::Receive
        } else if live(self.bytes_sent) || live(self.total_to_send) {
            Direction::Send
        } else {
            Direction::Idle
        }
    }

    /// `(moved, total)` for the active direction.
    #[must_use]
    pub fn counters(&self) -> (Option<u64>, Option<u64>) {
        match self.direction() {
            Direction::Send => (self.bytes_sent, self.total_to_send),
            Direction::Receive | Direction::Idle => (self.bytes_received, self.total_to_receive),
        }
    }
}

/// Mutable transfer counters for exactly one direction at a time.
///
/// Writing any receive-side counter zeroes both send-side counters first, and
/// the other way round. One instance belongs to one in-flight transfer and is
/// dropped when it finishes.
pub struct ProgressState {
    bytes_received:   Option<u64>,
    total_to_receive: Option<u64>,
    bytes_sent:       Option<u64>,
    total_to_send:    Option<u64>,
    in_progress:      bool,
    observers:        Vec<ProgressCallback>,
}

impl fmt::Debug for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressState")
            .field("bytes_received", &self.bytes_received)
            .field("total_to_receive", &self.total_to_receive)
            .field("bytes_sent", &self.bytes_sent)
            .field("total_to_send", &self.total_to_send)
            .field("in_progress", &self.in_progress)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for ProgressState {
    fn default() -> Self { Self::new() }
}

impl ProgressState {
    pub fn new() -> Self {
        Self {
            bytes_received:   Some(0),
            total_to_receive: Some(0),
            bytes_sent:       Some(0),
            total_to_send:    Some(0),
            in_progress:      false,
            observers:        Vec::new(),
        }
    }

    pub fn with_observer(observer: ProgressCallback) -> Self {
        let mut state = Self::new();
        state.observe(observer);
        state
    }

    pub fn observe(&mut self, observer: ProgressCallback) { self.observers.push(observer); }

    pub fn bytes_received(&self) -> Option<u64> { self.bytes_received }

    pub fn total_to_receive(&self) -> Option<u64> { self.total_to_receive }

    pub fn bytes_sent(&self) -> Option<u64> { self.bytes_sent }

    pub fn total_to_send(&self) -> Option<u64> { self.total_to_send }

    pub fn is_active(&self) -> bool { self.in_progress }

    pub fn set_bytes_received(&mut self, value: Option<u64>) {
        self.reset_send();
        self.bytes_received = value;
    }

    pub fn set_total_to_receive(&mut self, value: Option<u64>) {
        self.reset_send();
        self.total_to_receive = value;
    }

    pub fn set_bytes_sent(&mut self, value: Option<u64>) {
        self.reset_receive();
        self.bytes_sent = value;
    }

    pub fn set_total_to_send(&mut self, value: Option<u64>) {
        self.reset_receive();
        self.total_to_send = value;
    }

    /// Adds `n` to the received counter. An unknown counter counts from zero.
    pub fn add_received(&mut self, n: u64) {
        let current = self.bytes_received.unwrap_or(0);
        self.set_bytes_received(Some(current.saturating_add(n)));
    }

    pub fn add_sent(&mut self, n: u64) {
        let current = self.bytes_sent.unwrap_or(0);
        self.set_bytes_sent(Some(current.saturating_add(n)));
    }

    pub fn set_active(&mut self, active: bool) { self.in_progress = active; }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            bytes_received:   self.bytes_received,
            total_to_receive: self.total_to_receive,
            bytes_sent:       self.bytes_sent,
            total_to_send:    self.total_to_send,
            in_progress:      self.in_progress,
        }
    }

    /// Delivers the current snapshot to every observer, in registration order.
    pub fn report(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &self.observers {
            observer(&snapshot);
        }
    }

    fn reset_send(&mut self) {
        self.bytes_sent = Some(0);
        self.total_to_send = Some(0);
    }

    fn reset_receive(&mut self) {
        self.bytes_received = Some(0);
        self.total_to_receive = Some(0);
    }
}
