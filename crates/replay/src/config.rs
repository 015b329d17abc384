//! Replay configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use event_fusion::FusionConfig;

use crate::ReplayError;

/// Environment prefix, e.g. `DRIVE_ASSIST__FUSION__UNITS=metric`
pub const ENV_PREFIX: &str = "DRIVE_ASSIST";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub logging: LoggingConfig,

    /// Frames buffered between the reader and the engine
    pub channel_capacity: usize,

    pub fusion: FusionConfig,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            channel_capacity: 256,
            fusion: FusionConfig::default(),
        }
    }
}

/// Load configuration from an optional file, then `DRIVE_ASSIST__*` overrides.
///
/// Missing keys keep their defaults. The fusion section is validated.
pub fn load_config(path: Option<&Path>) -> Result<ReplayConfig, ReplayError> {
    let mut builder = ::config::Config::builder();
    if let Some(path) = path {
        debug!("Loading configuration from {}", path.display());
        builder = builder.add_source(::config::File::from(path));
    }
    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config: ReplayConfig = builder.build()?.try_deserialize()?;
    if config.channel_capacity == 0 {
        return Err(ReplayError::InvalidConfig(
            "channel_capacity must be positive".to_string(),
        ));
    }
    config.fusion.validate()?;
    Ok(config)
}
