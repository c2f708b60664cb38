//! Trailing-edge debouncing for query input.
//!
//! Each call to [`Debouncer::arm`] issues a ticket and invalidates every
//! ticket issued before it. A ticket fires only if no newer ticket was armed
//! while it waited out the delay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Input inactivity required before a query is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Ticket handed out by [`Debouncer::arm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Issue a new ticket, superseding any pending one.
    pub fn arm(&self) -> DebounceTicket {
        DebounceTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Invalidate whatever ticket is pending.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Wait out the delay; true if `ticket` is still the latest afterwards.
    pub async fn settle(&self, ticket: DebounceTicket) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_current(ticket)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
