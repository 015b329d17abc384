//! Alert vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of an audible alert. Each class debounces independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertClass {
    /// A new speed limit was read from a sign
    SpeedLimitAnnounce,
    /// Driving well above the held speed limit
    Overspeed,
    /// Stop sign ahead
    #[serde(rename = "stop")]
    StopSign,
    /// Roundabout warning sign
    RoundaboutWarning,
    /// Roundabout regulatory sign
    RoundaboutRegulatory,
    /// Speed bump warning sign
    SpeedBump,
}

impl AlertClass {
    /// Every alert class, in declaration order
    pub const ALL: [AlertClass; 6] = [
        AlertClass::SpeedLimitAnnounce,
        AlertClass::Overspeed,
        AlertClass::StopSign,
        AlertClass::RoundaboutWarning,
        AlertClass::RoundaboutRegulatory,
        AlertClass::SpeedBump,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertClass::SpeedLimitAnnounce => "speed-limit-announce",
            AlertClass::Overspeed => "overspeed",
            AlertClass::StopSign => "stop",
            AlertClass::RoundaboutWarning => "roundabout-warning",
            AlertClass::RoundaboutRegulatory => "roundabout-regulatory",
            AlertClass::SpeedBump => "speed-bump",
        }
    }
}

impl fmt::Display for AlertClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Localization key resolved by the speech and UI collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKey {
    /// "Speed limit"
    Limit,
    /// Joins the imperial and metric halves of an announcement
    Both,
    /// Metric unit suffix
    Metric,
    /// Imperial unit suffix
    Imperial,
    /// "Stop sign ahead"
    Stop,
    /// "Roundabout ahead"
    Rotary,
    /// "Speed bump ahead"
    Bump,
    /// "Slow down"
    Slow,
    /// Destination title when a search returned nothing
    Try,
    /// Address line when a search returned nothing
    Understand,
}

impl MessageKey {
    /// Key as it appears in the localization tables
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::Limit => "Limit",
            MessageKey::Both => "Both",
            MessageKey::Metric => "Metric",
            MessageKey::Imperial => "Imperial",
            MessageKey::Stop => "Stop",
            MessageKey::Rotary => "Rotary",
            MessageKey::Bump => "Bump",
            MessageKey::Slow => "Slow",
            MessageKey::Try => "Try",
            MessageKey::Understand => "Understand",
        }
    }
}

/// One parameter of a spoken alert, in utterance order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechParam {
    Number(u32),
    Key(MessageKey),
}

/// Request for an audible alert, handed to speech synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub class: AlertClass,
    pub key: MessageKey,
    pub params: Vec<SpeechParam>,
}

impl AlertRequest {
    /// Alert without parameters
    pub fn simple(class: AlertClass, key: MessageKey) -> Self {
        Self {
            class,
            key,
            params: Vec::new(),
        }
    }

    /// Localization keys and numbers joined in utterance order,
    /// e.g. `Limit 55 Both 88 Metric`
    pub fn utterance(&self) -> String {
        let mut parts = vec![self.key.as_str().to_string()];
        for param in &self.params {
            match param {
                SpeechParam::Number(n) => parts.push(n.to_string()),
                SpeechParam::Key(k) => parts.push(k.as_str().to_string()),
            }
        }
        parts.join(" ")
    }
}
