//! Alerting System
//!
//! Provides the alert vocabulary shared by the detectors, per-class alert
//! debouncing, and minimum-interval gating for periodic data refreshes.

mod class;
mod gate;
mod manager;

pub use class::{AlertClass, AlertRequest, MessageKey, SpeechParam};
pub use gate::RefreshGate;
pub use manager::{AlertClock, AlertConfig, AlertState};

/// Milliseconds since the start of the driving session.
pub type TimestampMs = u64;
