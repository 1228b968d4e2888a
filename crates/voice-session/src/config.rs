//! Session configuration
//!
//! Everything here is fixed at startup. [`SessionConfig`] is built once and
//! passed by reference into the session; nothing mutates it afterwards.

use anyhow::{ensure, Context};
use arm_gateway::{JointAngles, Orientation, Pose, Speed};
use command_oracle::OracleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use voice_local::TranscriberConfig;

/// Motion, timing and threshold constants for the command loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Orientation sent with every Cartesian move, whatever the live one is.
    pub fixed_orientation: Orientation,
    pub start_pose: Pose,
    pub zero_angles: JointAngles,
    pub move_speed: Speed,
    pub gripper_speed: Speed,
    pub sample_rate_hz: u32,
    pub record_secs: f64,
    /// Transcripts shorter than this (in characters) are discarded.
    pub min_transcript_chars: usize,
    pub oracle_timeout_secs: f64,
    /// Pause after each startup and shutdown move.
    pub settle_ms: u64,
    /// Pause after each actuated command before prompting again.
    pub command_settle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixed_orientation: Orientation::new(-179.46, -6.69, 95.57),
            start_pose: Pose::from_array([-329.1, 104.6, 179.1, -179.46, -6.69, 95.57]),
            zero_angles: JointAngles::ZERO,
            move_speed: Speed::new(30),
            gripper_speed: Speed::new(100),
            sample_rate_hz: 16_000,
            record_secs: 3.0,
            min_transcript_chars: 3,
            oracle_timeout_secs: 20.0,
            settle_ms: 3_000,
            command_settle_ms: 2_000,
        }
    }
}

impl SessionConfig {
    pub fn record_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.record_secs).unwrap_or_default()
    }

    pub fn oracle_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.oracle_timeout_secs).unwrap_or_default()
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn command_settle(&self) -> Duration {
        Duration::from_millis(self.command_settle_ms)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.sample_rate_hz > 0, "sample_rate_hz must be positive");
        ensure!(
            self.record_secs.is_finite() && self.record_secs > 0.0,
            "record_secs must be a positive number, got {}",
            self.record_secs
        );
        ensure!(
            self.oracle_timeout_secs.is_finite() && self.oracle_timeout_secs > 0.0,
            "oracle_timeout_secs must be a positive number, got {}",
            self.oracle_timeout_secs
        );
        let finite = self
            .start_pose
            .to_array()
            .iter()
            .chain(&self.zero_angles.0)
            .chain(&[
                self.fixed_orientation.rx,
                self.fixed_orientation.ry,
                self.fixed_orientation.rz,
            ])
            .all(|v| v.is_finite());
        ensure!(finite, "poses and angles must be finite");
        Ok(())
    }
}

/// Arm connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// `host:port` of the arm's socket server.
    pub address: String,
    pub io_timeout_ms: u64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            address: "192.168.43.94:9000".to_string(),
            io_timeout_ms: 2_000,
        }
    }
}

/// Whole-program configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceArmConfig {
    pub session: SessionConfig,
    pub robot: RobotConfig,
    pub oracle: OracleConfig,
    pub transcriber: TranscriberConfig,
}

impl VoiceArmConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: VoiceArmConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing yaml: {}", path.display()))?;
        cfg.session
            .validate()
            .with_context(|| format!("invalid session config: {}", path.display()))?;
        Ok(cfg)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self).context("encoding config")?;
        fs::write(path, yaml).with_context(|| format!("writing config: {}", path.display()))?;
        Ok(())
    }
}
