//! # Save Blob Schema
//!
//! The on-disk shape consumed and produced by the save/load collaborator.
//! The `_integrity` envelope is optional: saves written before the envelope
//! existed must still load.

use serde::{Deserialize, Serialize};

use crate::player::PlayerState;

/// Tamper-evidence envelope stamped onto a save blob at write time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityMetadata {
    /// Unix timestamp in milliseconds at stamp time.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    /// Player level at stamp time; doubles as a coarse save version.
    pub version: i64,
    /// Base-36 rolling checksum of the canonical player encoding.
    pub checksum: String,
}

/// A complete save blob: player state plus the optional integrity envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveBlob {
    /// The persisted character.
    pub player: PlayerState,
    /// Integrity envelope; absent on legacy saves.
    #[serde(rename = "_integrity", default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<IntegrityMetadata>,
}

impl SaveBlob {
    /// Wraps a player state into an unstamped blob.
    #[must_use]
    pub const fn new(player: PlayerState) -> Self {
        Self {
            player,
            integrity: None,
        }
    }
}
