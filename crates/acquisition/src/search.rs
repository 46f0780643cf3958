//! Stale-response guard for autocomplete lookups.
//!
//! Autocomplete callers debounce keystrokes and fire a lookup per settled
//! query, but responses can arrive out of order. Each dispatched lookup
//! takes a ticket from the sequencer; a response is applied only while its
//! ticket is still the latest, so a slow, superseded lookup can never
//! overwrite the result of a later query.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Recommended debounce window between a keystroke and the lookup it
/// triggers.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new lookup and returns its ticket. Issuing a ticket
    /// invalidates all previously issued ones.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while `ticket` still belongs to the most recently dispatched
    /// lookup; the response for any other ticket must be discarded.
    pub fn accept(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
