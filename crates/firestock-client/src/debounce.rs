//! Keystroke debouncing for search inputs.
//!
//! The list controller fetches once per search-term change. Callers that feed
//! it from a text field put a [`SearchDebouncer`] in front so only the term
//! that stays unchanged for the debounce delay reaches the controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use firestock_core::defaults;

#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(defaults::SEARCH_DEBOUNCE_MS))
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the delay and return `term` if no newer term arrived (and no
    /// cancel happened) meanwhile, otherwise `None`.
    pub async fn settle(&self, term: impl Into<String>) -> Option<String> {
        let term = term.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.generation.load(Ordering::SeqCst) == generation).then_some(term)
    }

    /// Invalidate every pending `settle`.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
