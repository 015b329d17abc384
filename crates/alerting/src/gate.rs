//! Minimum-interval gate for periodic data refreshes

use std::time::Duration;
use tracing::debug;

use crate::TimestampMs;

/// Lets a refresh through at most once per `interval`.
///
/// Same rule as the alert clock, applied to a single data source
/// instead of an alert class.
#[derive(Debug, Clone)]
pub struct RefreshGate {
    interval: Duration,
    last: Option<TimestampMs>,
}

impl RefreshGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Take the gate at `now` if the interval has elapsed
    pub fn try_acquire(&mut self, now: TimestampMs) -> bool {
        if let Some(last) = self.last {
            let elapsed = Duration::from_millis(now.saturating_sub(last));
            if elapsed < self.interval {
                debug!("Refresh gated: {:?} since last", elapsed);
                return false;
            }
        }
        self.last = Some(self.last.map_or(now, |last| last.max(now)));
        true
    }

    pub fn last_acquired(&self) -> Option<TimestampMs> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
