//! ADAS configuration

use serde::{Deserialize, Serialize};

/// ADAS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdasConfig {
    /// Number confidence required to accept a speed limit reading
    pub speed_limit_confidence: f32,

    /// Type confidence required for a stop sign
    pub stop_confidence: f32,

    /// Type confidence required for a roundabout warning sign
    pub roundabout_warning_confidence: f32,

    /// Type confidence required for a roundabout regulatory sign
    pub roundabout_regulatory_confidence: f32,

    /// Type confidence required for a speed bump sign
    pub speed_bump_confidence: f32,

    /// Speed over the limit (mph) at which "slow down" is spoken
    pub overspeed_margin_mph: u32,

    /// Tint intensity per unit of speed/limit ratio
    pub intensity_scale: f32,

    /// Upper bound for the overspeed tint intensity
    pub intensity_cap: f32,

    /// Time to collision at or below which an object is a warning (seconds)
    pub ttc_warning_s: f32,

    /// Time to collision at or below which an object is critical (seconds)
    pub ttc_critical_s: f32,
}

impl Default for AdasConfig {
    fn default() -> Self {
        Self {
            speed_limit_confidence: 0.9,
            stop_confidence: 0.99,
            roundabout_warning_confidence: 0.98,
            roundabout_regulatory_confidence: 0.98,
            speed_bump_confidence: 0.9,
            overspeed_margin_mph: 15,
            intensity_scale: 50.0 / 255.0,
            intensity_cap: 1.0,
            ttc_warning_s: 25.0,
            ttc_critical_s: 3.0,
        }
    }
}
