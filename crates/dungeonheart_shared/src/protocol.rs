//! # Leaderboard Protocol Types
//!
//! The subset of player state exposed to the network leaderboard. The
//! security subsystem is the only producer of `ScoreSubmission`; gameplay
//! code never builds one by hand, so an unvalidated character cannot reach
//! the wire.

use serde::{Deserialize, Serialize};

/// Score payload submitted to the leaderboard service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    /// Character name.
    pub name: String,
    /// Character level.
    pub level: i64,
    /// Lifetime kills.
    pub kills: i64,
    /// Power stat.
    pub power: i64,
    /// Defense stat.
    pub defense: i64,
    /// Gold on hand.
    pub gold: i64,
}
