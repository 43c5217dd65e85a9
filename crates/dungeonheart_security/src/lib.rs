//! # DUNGEONHEART Security - The Skeptical Librarian
//!
//! Save-integrity and anti-cheat subsystem. The entire game state lives on
//! the player's own disk and in the player's own process, so nothing here
//! makes cheating impossible — the goal is internal consistency, tamper
//! *evidence*, and honest telemetry about the difference.
//!
//! ## Features
//!
//! - **Hard validation**: range table + cross-field rules, fail-fast
//! - **Checksum envelope**: rolling digest over a canonical encoding
//! - **Heuristic auditors**: plausibility bands, advisory only
//! - **Runtime monitor**: leaky-bucket anomaly counter over snapshots
//! - **Action gates**: synchronous hard blocks on critical mutations
//!
//! ## Architecture
//!
//! ```text
//! LOAD TIME                          GAMEPLAY
//!     │                                  │
//!     ▼                                  ▼
//! session::audit_save          action::validate_action   (hard gate)
//!   ├─ validation  (hard)               │
//!   ├─ integrity   (policy)      monitor::sample          (advisory)
//!   └─ anti_cheat  (advisory)           │
//!     │                                  │
//!     ▼                                  ▼
//! accept/reject + warnings      counter → escalation log
//! ```
//!
//! Hard failures block the operation in progress and never get swallowed;
//! advisory findings are collected, logged via `tracing`, and never alter
//! control flow.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod action;
pub mod anti_cheat;
pub mod config;
pub mod error;
pub mod integrity;
pub mod monitor;
pub mod session;
pub mod validation;

pub use action::{validate_action, ActionPayload};
pub use anti_cheat::{check_progression_rate, detect_patterns, CheatWarning, ProgressionSample, WarningCategory};
pub use config::{ChecksumPolicy, SecurityConfig};
pub use error::{LogicalRule, MetadataRejection, SecurityError, SecurityResult};
pub use integrity::{attach_metadata, checksum, verify_checksum, verify_metadata, MetadataStatus};
pub use monitor::{RuntimeMonitor, Snapshot, TickReport};
pub use session::{audit_save, prepare_submission, stamp_save, LoadReport};
pub use validation::{range_of, validate_inventory, validate_player, Range, StatField, RANGES};
