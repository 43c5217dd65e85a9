//! # DUNGEONHEART Shared
//!
//! Common types used by both the gameplay layer and the security subsystem.
//!
//! ## CRITICAL RULE
//!
//! This crate holds the data model and nothing else. Validation, checksums
//! and anomaly detection all live in `dungeonheart_security`; if you are
//! about to add a `fn validate_*` here, you are in the wrong crate.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod player;
pub mod protocol;
pub mod save;

pub use constants::{GOLD_CEILING, MAX_BOSSES, MAX_LEVEL, STAT_CEILING};
pub use player::{ItemStack, PlayerState, Rarity};
pub use protocol::ScoreSubmission;
pub use save::{IntegrityMetadata, SaveBlob};
