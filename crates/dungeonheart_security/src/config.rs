//! # Security Configuration
//!
//! Every heuristic threshold in the subsystem lives here. The defaults
//! reproduce the shipped tuning; none of the values below are derived from
//! first principles, so they are configuration, not constants.
//!
//! Loadable from TOML the same way balance data is:
//!
//! ```rust,ignore
//! let config = SecurityConfig::from_toml("data/schemas/security.toml")?;
//! ```

use std::path::Path;

use serde::Deserialize;

use dungeonheart_shared::constants::{GOLD_CEILING, STAT_CEILING};

use crate::error::{SecurityError, SecurityResult};

/// How the session layer reacts to a missing or mismatching checksum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// Log and surface a warning, allow the load. Default: a client-side
    /// checksum detects tampering but cannot prove it, and strictness here
    /// would brick every pre-envelope save.
    #[default]
    Warn,
    /// Reject the load. For deployments where saves come from a trusted
    /// store rather than the player's own disk.
    Enforce,
}

/// Tunable thresholds for validation, auditing and runtime monitoring.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SecurityConfig {
    /// Hard ceiling enforced by the gold-change action gate.
    pub gold_ceiling: i64,
    /// Hard ceiling enforced by the stat-increase action gate.
    pub stat_ceiling: i64,
    /// What to do when a save blob fails checksum verification.
    pub checksum_policy: ChecksumPolicy,
    /// Save timestamps further than this from "now" draw an advisory
    /// warning (clock skew, copied saves).
    pub timestamp_window_ms: i64,
    /// Runtime monitor sampling period.
    pub check_interval_ms: i64,
    /// Consecutive-anomaly mass at which the monitor escalates.
    pub anomaly_threshold: u32,
    /// Largest per-sample increase of a tracked stat the monitor accepts
    /// without flagging.
    pub max_stat_jump: i64,
    /// Gold gained faster than this per rate window is flagged.
    pub max_gold_gain: i64,
    /// Levels gained faster than this per rate window are flagged.
    pub max_level_gain: i64,
    /// Window for the two rate rules above.
    pub rate_window_ms: i64,
    /// Gaining more than one level inside this window flags the
    /// progression-rate auditor.
    pub leveling_window_ms: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            gold_ceiling: GOLD_CEILING,
            stat_ceiling: STAT_CEILING,
            checksum_policy: ChecksumPolicy::Warn,
            timestamp_window_ms: 365 * 24 * 60 * 60 * 1000,
            check_interval_ms: 30_000,
            anomaly_threshold: 3,
            max_stat_jump: 50,
            max_gold_gain: 50_000,
            max_level_gain: 3,
            rate_window_ms: 5 * 60 * 1000,
            leveling_window_ms: 60_000,
        }
    }
}

impl SecurityConfig {
    /// Loads a configuration file, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SecurityError::InvalidConfig`] if the file cannot be read
    /// or parsed.
    pub fn from_toml(path: impl AsRef<Path>) -> SecurityResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SecurityError::InvalidConfig(e.to_string()))?;
        toml::from_str(&raw).map_err(|e| SecurityError::InvalidConfig(e.to_string()))
    }
}
