//! Drive Assist Replay
//!
//! Feeds recorded frames, one JSON object per line, through a
//! [`DriveAssist`] engine and writes each resulting action as one JSON line.
//! A reader task parses input and a single consumer owns the session.

mod config;
mod projector;

pub use config::{load_config, LoggingConfig, ReplayConfig, ENV_PREFIX};
pub use projector::CourseProjector;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use event_fusion::{DriveAssist, Frame, FusionError};

/// Replay error types
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Fusion error: {0}")]
    Fusion(#[from] FusionError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Reader task failed: {0}")]
    Reader(String),
}

/// Counters for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    /// Frames processed
    pub frames: u64,
    /// Actions written
    pub actions: u64,
    /// Input lines that were not valid frames
    pub skipped: u64,
}

/// Install the global tracing subscriber, writing to stderr
pub fn init_logging(config: &LoggingConfig) -> Result<(), ReplayError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| ReplayError::Logging(format!("unknown level {:?}", config.level)))?;

    let result = if config.json {
        let subscriber = FmtSubscriber::builder()
            .json()
            .with_max_level(level)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    result.map_err(|e| ReplayError::Logging(e.to_string()))
}

/// Replay every frame of `input` and write the actions to `output`.
///
/// Lines that do not parse as frames are logged and skipped. Blank lines are
/// ignored.
pub async fn run_replay<R, W>(
    config: ReplayConfig,
    input: R,
    mut output: W,
) -> Result<ReplayStats, ReplayError>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    config.fusion.validate()?;
    let (frame_tx, mut frame_rx) = mpsc::channel::<Frame>(config.channel_capacity.max(1));

    let reader = tokio::spawn(read_frames(input, frame_tx));

    let mut engine = DriveAssist::new(config.fusion, CourseProjector::new());
    let mut stats = ReplayStats::default();

    while let Some(frame) = frame_rx.recv().await {
        let actions = engine.process_frame(frame);
        stats.frames += 1;

        for action in &actions {
            let mut line = serde_json::to_vec(action)?;
            line.push(b'\n');
            output.write_all(&line).await?;
        }
        stats.actions += actions.len() as u64;
    }
    output.flush().await?;

    stats.skipped = reader
        .await
        .map_err(|e| ReplayError::Reader(e.to_string()))??;

    info!(
        "Replay finished: {} frames, {} actions, {} skipped",
        stats.frames, stats.actions, stats.skipped
    );
    Ok(stats)
}

/// Parse input lines into frames. Returns the number of skipped lines.
async fn read_frames<R>(input: R, frame_tx: mpsc::Sender<Frame>) -> Result<u64, ReplayError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut line_no = 0u64;
    let mut skipped = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Frame>(line) {
            Ok(frame) => {
                if frame_tx.send(frame).await.is_err() {
                    debug!("Engine stopped, reader exiting at line {}", line_no);
                    break;
                }
            }
            Err(e) => {
                warn!("Skipping line {}: {}", line_no, e);
                skipped += 1;
            }
        }
    }

    Ok(skipped)
}
