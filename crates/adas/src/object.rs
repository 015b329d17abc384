//! Collision risk aggregation

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AdasConfig;

/// Danger level of a potential collision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    #[default]
    None,
    Warning,
    Critical,
}

impl DangerLevel {
    /// Classify a raw time to collision (seconds)
    pub fn from_time_to_collision(ttc_s: f32, config: &AdasConfig) -> Self {
        if ttc_s <= config.ttc_critical_s {
            DangerLevel::Critical
        } else if ttc_s <= config.ttc_warning_s {
            DangerLevel::Warning
        } else {
            DangerLevel::None
        }
    }
}

/// Object on a collision course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionObject {
    /// Level reported by perception, if it classified the object itself
    #[serde(default)]
    pub danger: Option<DangerLevel>,

    /// Raw time to collision (seconds)
    #[serde(default)]
    pub ttc_s: Option<f32>,

    /// Bounding box relative to the frame [x, y, width, height], 0..1
    pub bbox: [f32; 4],

    /// Perception frame this detection came from
    pub frame_id: u64,
}

impl CollisionObject {
    /// Reported level, else the level of its time to collision.
    /// An object with neither is no danger.
    pub fn level(&self, config: &AdasConfig) -> DangerLevel {
        match (self.danger, self.ttc_s) {
            (Some(danger), _) => danger,
            (None, Some(ttc_s)) => DangerLevel::from_time_to_collision(ttc_s, config),
            (None, None) => DangerLevel::None,
        }
    }
}

/// Holds the collision set of the latest frame only
#[derive(Debug, Clone, Default)]
pub struct CollisionAggregator {
    current: Vec<CollisionObject>,
}

impl CollisionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current set wholesale, resolving every object's level
    pub fn replace(&mut self, objects: Vec<CollisionObject>, config: &AdasConfig) {
        debug!("Collision set replaced: {} objects", objects.len());
        self.current = objects
            .into_iter()
            .map(|mut object| {
                object.danger = Some(object.level(config));
                object
            })
            .collect();
    }

    /// Whether the "slow down" indicator should be shown
    pub fn critical_active(&self) -> bool {
        self.current
            .iter()
            .any(|o| o.danger == Some(DangerLevel::Critical))
    }

    /// Highest danger level in the current set
    pub fn overall(&self) -> DangerLevel {
        self.current
            .iter()
            .filter_map(|o| o.danger)
            .max()
            .unwrap_or_default()
    }

    /// Current set, for bounding box rendering
    pub fn objects(&self) -> &[CollisionObject] {
        &self.current
    }
}
