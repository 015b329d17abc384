//! Fusion configuration

use serde::{Deserialize, Serialize};

use adas::{AdasConfig, Units};
use alerting::AlertConfig;
use poi::PoiConfig;

use crate::FusionError;

/// Fusion configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Per-class alert intervals
    pub alerting: AlertConfig,

    /// Sign, speed, and collision thresholds
    pub adas: AdasConfig,

    /// Place search and visibility
    pub poi: PoiConfig,

    /// Initial unit preference
    pub units: Units,
}

impl FusionConfig {
    /// Reject thresholds that cannot be met or ranges that are inverted
    pub fn validate(&self) -> Result<(), FusionError> {
        let adas = &self.adas;
        let confidences = [
            ("speed_limit_confidence", adas.speed_limit_confidence),
            ("stop_confidence", adas.stop_confidence),
            ("roundabout_warning_confidence", adas.roundabout_warning_confidence),
            ("roundabout_regulatory_confidence", adas.roundabout_regulatory_confidence),
            ("speed_bump_confidence", adas.speed_bump_confidence),
        ];
        for (name, value) in confidences {
            if !(0.0..=1.0).contains(&value) {
                return Err(FusionError::InvalidConfig(format!(
                    "adas.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if adas.intensity_cap <= 0.0 || adas.intensity_scale <= 0.0 {
            return Err(FusionError::InvalidConfig(
                "adas.intensity_scale and adas.intensity_cap must be positive".to_string(),
            ));
        }

        if adas.ttc_critical_s > adas.ttc_warning_s {
            return Err(FusionError::InvalidConfig(format!(
                "adas.ttc_critical_s ({}) exceeds adas.ttc_warning_s ({})",
                adas.ttc_critical_s, adas.ttc_warning_s
            )));
        }

        let visibility = self.poi.visibility_distance_m;
        if visibility.is_nan() || visibility <= 0.0 {
            return Err(FusionError::InvalidConfig(
                "poi.visibility_distance_m must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
