//! # Security Error Types
//!
//! Hard failures raised by the integrity subsystem. Advisory findings are
//! never errors; they travel as [`CheatWarning`](crate::anti_cheat::CheatWarning)
//! lists instead.

use thiserror::Error;

use crate::validation::StatField;

/// Cross-field rules enforced after range validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalRule {
    /// `health` must not exceed `max_health`.
    HealthAboveMax,
    /// `energy` must not exceed `max_energy`.
    EnergyAboveMax,
    /// `mana` must not exceed `max_mana`.
    ManaAboveMax,
}

impl core::fmt::Display for LogicalRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::HealthAboveMax => "health cannot exceed maxHealth",
            Self::EnergyAboveMax => "energy cannot exceed maxEnergy",
            Self::ManaAboveMax => "mana cannot exceed maxMana",
        };
        f.write_str(text)
    }
}

/// Why integrity metadata was rejected (only under the enforcing policy).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataRejection {
    /// The blob carries no `_integrity` envelope.
    Missing,
    /// The stored checksum does not match the recomputed one.
    ChecksumMismatch,
}

impl core::fmt::Display for MetadataRejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::Missing => "integrity metadata missing",
            Self::ChecksumMismatch => "checksum mismatch",
        };
        f.write_str(text)
    }
}

/// Errors that can occur in the security subsystem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// A tracked numeric field is outside its declared bounds.
    #[error("invalid {field}: {value} (must be {min}-{max})")]
    RangeViolation {
        /// The offending field.
        field: StatField,
        /// The value found in the save.
        value: i64,
        /// Lower bound, inclusive.
        min: i64,
        /// Upper bound, inclusive.
        max: i64,
    },

    /// A cross-field rule was violated.
    #[error("{rule}")]
    LogicalViolation {
        /// The violated rule.
        rule: LogicalRule,
    },

    /// The save data is malformed beyond what the type system rules out.
    #[error("malformed save data: {reason}")]
    Structural {
        /// Human-readable description of the defect.
        reason: String,
    },

    /// A gated mutation was rejected and must not be committed.
    #[error("action '{action}' rejected: {reason}")]
    ActionRejected {
        /// The gate that fired (`levelUp`, `goldChange`, ...).
        action: &'static str,
        /// Why the mutation is not allowed.
        reason: String,
    },

    /// Integrity metadata rejected under [`ChecksumPolicy::Enforce`].
    ///
    /// [`ChecksumPolicy::Enforce`]: crate::config::ChecksumPolicy::Enforce
    #[error("save rejected: {0}")]
    MetadataRejected(MetadataRejection),

    /// Configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for security operations.
pub type SecurityResult<T> = Result<T, SecurityError>;
