//! Alert debounce clock

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::{AlertClass, TimestampMs};

/// Minimum interval between two alerts of the same class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Speed limit announcement interval (ms)
    pub speed_limit_announce_ms: u64,
    /// "Slow down" for speeding interval (ms)
    pub overspeed_ms: u64,
    /// Stop sign interval (ms)
    pub stop_sign_ms: u64,
    /// Roundabout warning sign interval (ms)
    pub roundabout_warning_ms: u64,
    /// Roundabout regulatory sign interval (ms)
    pub roundabout_regulatory_ms: u64,
    /// Speed bump interval (ms)
    pub speed_bump_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            speed_limit_announce_ms: 4_000,
            overspeed_ms: 4_000,
            stop_sign_ms: 6_000,
            roundabout_warning_ms: 6_000,
            roundabout_regulatory_ms: 4_000,
            speed_bump_ms: 4_000,
        }
    }
}

impl AlertConfig {
    /// Configured minimum interval for a class
    pub fn interval(&self, class: AlertClass) -> Duration {
        let ms = match class {
            AlertClass::SpeedLimitAnnounce => self.speed_limit_announce_ms,
            AlertClass::Overspeed => self.overspeed_ms,
            AlertClass::StopSign => self.stop_sign_ms,
            AlertClass::RoundaboutWarning => self.roundabout_warning_ms,
            AlertClass::RoundaboutRegulatory => self.roundabout_regulatory_ms,
            AlertClass::SpeedBump => self.speed_bump_ms,
        };
        Duration::from_millis(ms)
    }
}

/// State of an alert class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertState {
    /// Last time this class fired
    pub last_fired: TimestampMs,
    /// Number of times fired this session
    pub fire_count: usize,
}

/// Per-class debounce clock.
///
/// Holds at most one [`AlertState`] per [`AlertClass`]. A class that never
/// fired is always allowed to fire.
#[derive(Debug, Clone, Default)]
pub struct AlertClock {
    config: AlertConfig,
    states: HashMap<AlertClass, AlertState>,
}

impl AlertClock {
    /// Create a new alert clock
    pub fn new(config: AlertConfig) -> Self {
        debug!("Creating alert clock with config: {:?}", config);
        Self {
            config,
            states: HashMap::new(),
        }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Check against the configured interval for `class`
    pub fn should_fire(&self, class: AlertClass, now: TimestampMs) -> bool {
        self.should_fire_within(class, now, self.config.interval(class))
    }

    /// Check whether `class` may fire at `now` given `min_interval`.
    ///
    /// Callers that act on a `true` answer must follow up with
    /// [`AlertClock::record_fire`].
    pub fn should_fire_within(
        &self,
        class: AlertClass,
        now: TimestampMs,
        min_interval: Duration,
    ) -> bool {
        let Some(state) = self.states.get(&class) else {
            return true;
        };

        let elapsed = Duration::from_millis(now.saturating_sub(state.last_fired));
        if elapsed < min_interval {
            debug!(
                "Alert {} suppressed: {:?} since last, need {:?}",
                class, elapsed, min_interval
            );
            return false;
        }
        true
    }

    /// Record that `class` fired at `now`. Timestamps never move backwards.
    pub fn record_fire(&mut self, class: AlertClass, now: TimestampMs) {
        let state = self.states.entry(class).or_insert(AlertState {
            last_fired: now,
            fire_count: 0,
        });

        state.last_fired = state.last_fired.max(now);
        state.fire_count += 1;

        info!("Alert fired: {} (count: {})", class, state.fire_count);
    }

    /// `should_fire` followed by `record_fire` when permitted
    pub fn try_fire(&mut self, class: AlertClass, now: TimestampMs) -> bool {
        if self.should_fire(class, now) {
            self.record_fire(class, now);
            true
        } else {
            false
        }
    }

    /// Last firing time of a class, if it ever fired
    pub fn last_fired(&self, class: AlertClass) -> Option<TimestampMs> {
        self.states.get(&class).map(|s| s.last_fired)
    }

    /// Number of times a class has fired
    pub fn fire_count(&self, class: AlertClass) -> usize {
        self.states.get(&class).map_or(0, |s| s.fire_count)
    }

    /// Clear all alert states
    pub fn clear(&mut self) {
        self.states.clear();
    }
}
