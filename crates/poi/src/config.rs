//! POI configuration

use serde::{Deserialize, Serialize};

/// POI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoiConfig {
    /// Maximum forward distance at which a POI is shown (meters)
    pub visibility_distance_m: f64,

    /// Minimum time between nearby place searches (ms)
    pub refresh_interval_ms: u64,

    /// Search radius around the vehicle (meters)
    pub search_radius_m: u32,

    /// Maximum number of places per search
    pub search_limit: u32,

    /// Place categories to search for. Each one is also a glyph name.
    pub categories: Vec<String>,
}

impl Default for PoiConfig {
    fn default() -> Self {
        let categories = [
            "arts-entertainment",
            "transit-system",
            "education",
            "government-building",
            "major-us-airport",
            "major-us-sports-venue-stadium",
            "hotel-lodging",
            "medical-health",
            "public-services-government",
            "religion",
            "science-engineering",
            "shopping-retail",
            "sports-recreation",
            "travel-transportation",
            "gas-station",
        ];

        Self {
            visibility_distance_m: 500.0,
            refresh_interval_ms: 2_000,
            search_radius_m: 1_000,
            search_limit: 90,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }
}
