//! Search input debouncing

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Latest-value-wins debouncer
///
/// Each call to [`Debouncer::settle`] supersedes every call still waiting.
/// A zero delay passes values straight through.
#[derive(Debug, Default)]
pub struct Debouncer {
    delay: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: AtomicU64::new(0),
        }
    }

    /// Create a debouncer from a millisecond quiet period
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Quiet period
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the quiet period
    ///
    /// Returns `Some(value)` if no newer value arrived meanwhile.
    pub async fn settle<T: Send>(&self, value: T) -> Option<T> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if self.delay.is_zero() {
            return Some(value);
        }

        tokio::time::sleep(self.delay).await;
        (self.latest.load(Ordering::SeqCst) == ticket).then_some(value)
    }
}
