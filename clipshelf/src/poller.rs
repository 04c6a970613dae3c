//! Background clipboard poller.
//!
//! A single sequential loop: sleep, sample the clipboard, promote new
//! values into the store. The last-seen value is plain state owned by the
//! poller and updated only when a tick completes a promotion; ticks never
//! overlap. The loop has no stop condition beyond process termination.

use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::clipboard::Clipboard;
use crate::error::HistoryError;
use crate::store::HistoryStore;

/// Default sampling interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(800);

pub struct Poller<C: Clipboard> {
    store: HistoryStore,
    clipboard: C,
    interval: Duration,
    last_seen: Option<String>,
}

impl<C: Clipboard> Poller<C> {
    pub fn new(store: HistoryStore, clipboard: C) -> Self {
        Self {
            store,
            clipboard,
            interval: DEFAULT_POLL_INTERVAL,
            last_seen: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Direct access to the injected clipboard, for tests that simulate
    /// external copies between ticks.
    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    /// One sampling step. Reads the clipboard, trims trailing whitespace,
    /// and promotes the value unless it is empty, unchanged since the last
    /// tick, or already the top of history. Returns whether a promotion
    /// happened.
    pub fn tick(&mut self) -> Result<bool, HistoryError> {
        let raw = self.clipboard.read()?;
        let current = raw.trim_end();

        if current.is_empty() || self.last_seen.as_deref() == Some(current) {
            return Ok(false);
        }
        if self
            .store
            .list_history()
            .first()
            .map(|e| e.value.as_str())
            == Some(current)
        {
            return Ok(false);
        }

        self.store.promote(current)?;
        debug!("captured clipboard value ({} chars)", current.chars().count());
        self.last_seen = Some(current.to_string());
        Ok(true)
    }

    /// Sample forever. A failed tick (clipboard capability or store write)
    /// is logged and skipped; the failed value never reaches the store.
    pub fn run(mut self) -> ! {
        loop {
            if let Err(e) = self.tick() {
                warn!("poll tick failed: {}", e);
            }
            thread::sleep(self.interval);
        }
    }
}
